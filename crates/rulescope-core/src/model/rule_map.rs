//! Rule map documents returned by `ui/rules` and `ui/rulesByCategory`
//!
//! The backend builds these from live rule engine metadata, so the shape is
//! only loosely guaranteed. Decoding happens once at the transport boundary:
//! `ncubes` is optional, while a missing `objects`, `rules` or `className`
//! rejects the whole document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::Result;

/// One rule method and the artifacts it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Method (rule) name
    pub value: String,
    /// Referenced n-cube names; `None` when the server omitted the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncubes: Option<Vec<String>>,
    /// Application id the artifacts belong to, as a display string; empty
    /// when the server omitted it or sent `null`
    #[serde(rename = "appId", default, deserialize_with = "app_id_string")]
    pub app_id: String,
}

/// A rule object owning an ordered list of rule methods
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleObject {
    pub rules: Vec<RuleEntry>,
}

/// One rule type, its implementing class, and its objects
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleTypeEntry {
    #[serde(rename = "className")]
    pub class_name: String,
    pub objects: IndexMap<String, RuleObject>,
}

/// Rule type name → rule type entry, in server order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleMap {
    rule_types: IndexMap<String, RuleTypeEntry>,
}

impl RuleMap {
    /// Build a rule map from an ordered rule type map
    pub fn new(rule_types: IndexMap<String, RuleTypeEntry>) -> Self {
        Self { rule_types }
    }

    /// Decode a rules response body
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for structurally malformed documents.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Iterate rule types in server order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleTypeEntry)> {
        self.rule_types.iter()
    }

    /// Look up a rule type
    pub fn get(&self, rule_type: &str) -> Option<&RuleTypeEntry> {
        self.rule_types.get(rule_type)
    }

    /// Number of rule types
    pub fn len(&self) -> usize {
        self.rule_types.len()
    }

    /// Check if the map holds no rule types
    pub fn is_empty(&self) -> bool {
        self.rule_types.is_empty()
    }
}

/// The `ui/ncube` response: a standalone HTML page for one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NCubeHtml {
    pub html: String,
}

impl NCubeHtml {
    /// Decode a `ui/ncube` response body
    ///
    /// # Errors
    ///
    /// Returns `Serialization` when `html` is missing or not a string.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

// Strings pass through, null is empty, other JSON values keep their JSON text.
fn app_id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RulesError;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_rule_type_and_object_order() {
        let map = RuleMap::from_value(json!({
            "Validation": {"className": "Validator", "objects": {
                "B": {"rules": []},
                "A": {"rules": []}
            }},
            "Transformation": {"className": "Transformer", "objects": {}}
        }))
        .unwrap();

        let types: Vec<&String> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(types, vec!["Validation", "Transformation"]);
        let objects: Vec<&String> = map.get("Validation").unwrap().objects.keys().collect();
        assert_eq!(objects, vec!["B", "A"]);
    }

    #[test]
    fn test_absent_ncubes_is_none_and_empty_is_some() {
        let map = RuleMap::from_value(json!({
            "T": {"className": "C", "objects": {"O": {"rules": [
                {"value": "noRefs", "appId": "app1"},
                {"value": "emptyRefs", "ncubes": [], "appId": "app1"}
            ]}}}
        }))
        .unwrap();

        let rules = &map.get("T").unwrap().objects["O"].rules;
        assert_eq!(rules[0].ncubes, None);
        assert_eq!(rules[1].ncubes, Some(vec![]));
    }

    #[test]
    fn test_structured_app_id_keeps_json_text() {
        let map = RuleMap::from_value(json!({
            "T": {"className": "C", "objects": {"O": {"rules": [
                {"value": "m", "ncubes": ["N"], "appId": {"app": "demo", "version": "1.0.0"}}
            ]}}}
        }))
        .unwrap();

        let entry = &map.get("T").unwrap().objects["O"].rules[0];
        assert_eq!(entry.app_id, r#"{"app":"demo","version":"1.0.0"}"#);
    }

    #[test]
    fn test_missing_or_null_app_id_is_empty() {
        let map = RuleMap::from_value(json!({
            "T": {"className": "C", "objects": {"O": {"rules": [
                {"value": "m"},
                {"value": "n", "appId": null}
            ]}}}
        }))
        .unwrap();

        let rules = &map.get("T").unwrap().objects["O"].rules;
        assert_eq!(rules[0].app_id, "");
        assert_eq!(rules[1].app_id, "");
    }

    #[test]
    fn test_missing_objects_is_rejected() {
        let result = RuleMap::from_value(json!({"T": {"className": "C"}}));
        assert!(matches!(result, Err(RulesError::Serialization { .. })));
    }

    #[test]
    fn test_ncube_html_decode() {
        let page = NCubeHtml::from_value(json!({"html": "<html></html>"})).unwrap();
        assert_eq!(page.html, "<html></html>");
        assert!(NCubeHtml::from_value(json!({"body": "x"})).is_err());
    }
}
