//! Query dispatch: turning selection state into server requests
//!
//! Request construction is pure. Executing a request is the transport's job
//! (see `rulescope-client`), which keeps the decision of *what* to ask for
//! testable without a server.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::render::ArtifactRef;
use crate::selection::SelectionState;
use crate::selectors::CategoryRow;

/// Key under which the engine travels in a by-category body
pub const CATEGORY_ENGINE_KEY: &str = "_engine";

/// HTTP method of a server call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Server endpoints consumed by the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endpoint {
    /// Catalog of engines, groups and categories
    Info,
    /// Rules of one group
    Rules,
    /// Rules matching category filters
    RulesByCategory,
    /// HTML detail page of one artifact
    NCube,
}

impl Endpoint {
    /// Path relative to the server root
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Info => "ui/info",
            Endpoint::Rules => "ui/rules",
            Endpoint::RulesByCategory => "ui/rulesByCategory",
            Endpoint::NCube => "ui/ncube",
        }
    }
}

/// Ordered request body; key order is preserved on the wire
pub type RequestBody = IndexMap<String, Value>;

/// A fully described server call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    fn new(method: Method, endpoint: Endpoint, body: Option<RequestBody>) -> Self {
        Self {
            method,
            endpoint,
            body,
        }
    }

    /// Body rendered as URL query pairs, for GET requests
    ///
    /// Strings are sent verbatim; any other value is sent as its JSON text.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(body) = &self.body else {
            return Vec::new();
        };
        body.iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }

    /// Body as a JSON value, for POST requests
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_ref()
            .map(|body| Value::Object(body.clone().into_iter().collect()))
    }
}

/// `GET ui/info`
pub fn catalog_info() -> ApiRequest {
    ApiRequest::new(Method::Get, Endpoint::Info, None)
}

/// `GET ui/rules {engine, group}`; `None` while no group is selected
pub fn rules_by_group(engine: &str, group: &str) -> Option<ApiRequest> {
    if group.is_empty() {
        return None;
    }
    let mut body = RequestBody::new();
    body.insert("engine".to_string(), Value::from(engine));
    body.insert("group".to_string(), Value::from(group));
    Some(ApiRequest::new(Method::Get, Endpoint::Rules, Some(body)))
}

/// `POST ui/rulesByCategory {_engine, <category>: [values], ...}`
///
/// Rows are visited in display order and keyed by their label; a row with no
/// selected value is left out of the body.
pub fn rules_by_category(
    engine: &str,
    rows: &[CategoryRow],
    selection: &SelectionState,
) -> ApiRequest {
    let mut body = RequestBody::new();
    body.insert(CATEGORY_ENGINE_KEY.to_string(), Value::from(engine));
    for row in rows {
        let values = row.selected_in_order(selection);
        if !values.is_empty() {
            body.insert(row.label.clone(), Value::from(values));
        }
    }
    ApiRequest::new(Method::Post, Endpoint::RulesByCategory, Some(body))
}

/// `GET ui/ncube {name, appIdString}`
pub fn ncube_detail(artifact: &ArtifactRef) -> ApiRequest {
    let mut body = RequestBody::new();
    body.insert("name".to_string(), Value::from(artifact.name.as_str()));
    body.insert(
        "appIdString".to_string(),
        Value::from(artifact.app_id.as_str()),
    );
    ApiRequest::new(Method::Get, Endpoint::NCube, Some(body))
}
