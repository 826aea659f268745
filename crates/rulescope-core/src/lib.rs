//! rulescope core - client-side state and rendering for the rule catalog explorer
//!
//! This crate holds everything that does not need a network:
//! - Catalog and rule map documents decoded from the server (`model`)
//! - The user's engine / group / category selection (`selection`)
//! - The selector view model built from the catalog (`selectors`)
//! - Request construction for each query mode (`query`)
//! - The rule outline builder and its text / HTML / JSON renderers (`render`)
//! - The page controller state machine tying them together (`controller`)
//!
//! Executing requests lives in `rulescope-client`.

pub mod controller;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod query;
pub mod render;
pub mod selection;
pub mod selectors;

#[doc(hidden)]
pub use rulescope_core_types::schema as __log_schema;

// Re-export commonly used types
pub use controller::{DetailView, DetailViews, PageController};
pub use errors::{ExError, ExErrorKind, Result, RulesError};
pub use model::{CatalogInfo, EngineDescriptor, NCubeHtml, RuleEntry, RuleMap};
pub use query::{ApiRequest, Endpoint, Method};
pub use render::{ArtifactRef, Outline, OutlineNode};
pub use selection::SelectionState;
pub use selectors::SelectorView;
