pub mod catalog;
pub mod rule_map;

pub use catalog::{CatalogInfo, EngineDescriptor};
pub use rule_map::{NCubeHtml, RuleEntry, RuleMap, RuleObject, RuleTypeEntry};

/// Opaque identifier of an execution engine
pub type EngineId = String;
/// Name of a rule group within an engine
pub type GroupName = String;
/// Name of a category filter dimension
pub type CategoryName = String;
/// One selectable value of a category
pub type CategoryValue = String;
