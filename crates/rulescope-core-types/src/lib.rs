//! Identifiers and log vocabulary shared by the rulescope crates
//!
//! `correlation::RequestId` tags each server call. `schema` names the fields
//! and event values every operation log line uses.

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
