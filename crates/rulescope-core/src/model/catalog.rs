use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RulesError};
use crate::model::{CategoryName, CategoryValue, EngineId, GroupName};

/// Groups and category filters offered by one engine
///
/// `categories` may be missing from the server document; a missing map and an
/// empty map both mean "no category filtering for this engine".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineDescriptor {
    pub groups: Vec<GroupName>,
    #[serde(default)]
    pub categories: IndexMap<CategoryName, Vec<CategoryValue>>,
}

impl EngineDescriptor {
    /// Check whether the group dropdown offers `group`
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Values offered by a category, in catalog order
    pub fn category_values(&self, category: &str) -> Option<&[CategoryValue]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Whether the category filter form should be shown at all
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// The `ui/info` document: every engine and what it offers
///
/// Loaded once per session and never mutated afterwards. Engine order is the
/// key order of the server document; the first engine is the default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogInfo {
    engines: IndexMap<EngineId, EngineDescriptor>,
}

impl CatalogInfo {
    /// Build a catalog from an ordered engine map
    pub fn new(engines: IndexMap<EngineId, EngineDescriptor>) -> Self {
        Self { engines }
    }

    /// Decode a `ui/info` response body
    ///
    /// # Errors
    ///
    /// Returns `Serialization` when the document is not an engine map.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Engine ids in catalog order
    pub fn engine_ids(&self) -> impl Iterator<Item = &EngineId> {
        self.engines.keys()
    }

    /// The engine selected when the catalog first loads
    pub fn default_engine(&self) -> Option<&str> {
        self.engines.keys().next().map(String::as_str)
    }

    /// Look up an engine descriptor
    pub fn engine(&self, engine: &str) -> Option<&EngineDescriptor> {
        self.engines.get(engine)
    }

    /// Look up an engine descriptor, failing for unknown ids
    ///
    /// # Errors
    ///
    /// Returns `UnknownEngine` if the catalog has no such engine.
    pub fn require_engine(&self, engine: &str) -> Result<&EngineDescriptor> {
        self.engines
            .get(engine)
            .ok_or_else(|| RulesError::UnknownEngine {
                engine: engine.to_string(),
            })
    }

    /// Iterate engines with their descriptors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&EngineId, &EngineDescriptor)> {
        self.engines.iter()
    }

    /// Number of engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Check if the catalog offers no engines
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_preserves_engine_order() {
        let catalog = CatalogInfo::from_value(json!({
            "Zeta": {"groups": []},
            "Alpha": {"groups": ["G1"]},
        }))
        .unwrap();

        let ids: Vec<&String> = catalog.engine_ids().collect();
        assert_eq!(ids, vec!["Zeta", "Alpha"]);
        assert_eq!(catalog.default_engine(), Some("Zeta"));
    }

    #[test]
    fn test_missing_categories_decode_as_empty() {
        let catalog = CatalogInfo::from_value(json!({"E1": {"groups": ["G1"]}})).unwrap();
        let engine = catalog.engine("E1").unwrap();
        assert!(!engine.has_categories());
        assert!(engine.has_group("G1"));
    }

    #[test]
    fn test_require_engine_unknown() {
        let catalog = CatalogInfo::default();
        assert_eq!(
            catalog.require_engine("E9"),
            Err(RulesError::UnknownEngine {
                engine: "E9".to_string()
            })
        );
    }

    #[test]
    fn test_non_map_document_is_rejected() {
        let result = CatalogInfo::from_value(json!(["E1", "E2"]));
        assert!(matches!(result, Err(RulesError::Serialization { .. })));
    }
}
