use rulescope_core::{CatalogInfo, PageController, RuleMap};
use serde_json::json;

/// Two engines: E1 with one category, E2 with none
#[allow(dead_code)]
pub fn two_engine_catalog() -> CatalogInfo {
    CatalogInfo::from_value(json!({
        "E1": {
            "groups": ["G1", "G2"],
            "categories": {"Status": ["Active", "Pending", "Retired"], "Region": ["EU", "US"]}
        },
        "E2": {"groups": ["Billing"], "categories": {}}
    }))
    .unwrap()
}

/// The single-rule map used by the end-to-end walkthrough
#[allow(dead_code)]
pub fn validation_rules() -> RuleMap {
    RuleMap::from_value(json!({
        "Validation": {"className": "Validator", "objects": {
            "Obj1": {"rules": [{"value": "checkX", "ncubes": ["N1"], "appId": "app1"}]}
        }}
    }))
    .unwrap()
}

/// A map with several types, objects and methods
#[allow(dead_code)]
pub fn billing_rules() -> RuleMap {
    RuleMap::from_value(json!({
        "Pricing": {"className": "PriceRule", "objects": {
            "Invoice": {"rules": [
                {"value": "applyDiscount", "ncubes": ["Discounts", "Tiers"], "appId": "app2"},
                {"value": "roundTotal", "appId": "app2"}
            ]},
            "Quote": {"rules": []}
        }},
        "Audit": {"className": "AuditRule", "objects": {}}
    }))
    .unwrap()
}

/// Controller after init with the two-engine catalog loaded
#[allow(dead_code)]
pub fn loaded_controller() -> PageController {
    let mut controller = PageController::new();
    controller.init();
    controller.on_catalog_loaded(two_engine_catalog()).unwrap();
    controller
}

#[allow(dead_code)]
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
