//! rulescope client - talks to the rules backend
//!
//! Couples the pure state machine in `rulescope-core` with a transport:
//! `HttpTransport` for a live backend, or any other `Transport` in tests.

pub mod config;
pub mod errors;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use session::{Completion, ExplorerSession};
pub use transport::{HttpTransport, Transport};
