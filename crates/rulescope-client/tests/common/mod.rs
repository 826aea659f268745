//! Shared fixtures: a scripted in-memory transport and a fake rules backend

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use rulescope_client::errors::{transport_error, Result};
use rulescope_client::Transport;
use rulescope_core::ApiRequest;
use serde_json::{json, Value};

pub fn catalog_json() -> Value {
    json!({
        "E1": {"groups": ["G1", "G2"], "categories": {"Status": ["Active", "Pending"]}},
        "E2": {"groups": ["Billing"]}
    })
}

pub fn validation_json() -> Value {
    json!({
        "Validation": {"className": "Validator", "objects": {
            "Obj1": {"rules": [{"value": "checkX", "ncubes": ["N1"], "appId": "app1"}]}
        }}
    })
}

pub fn pricing_json() -> Value {
    json!({
        "Pricing": {"className": "PriceRule", "objects": {
            "Invoice": {"rules": [{"value": "applyDiscount", "appId": "app2"}]}
        }}
    })
}

/// Answers requests from a queue, in order, and records what was asked
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, value: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(value));
        self
    }

    /// Queue `value` ahead of everything already scripted
    pub fn respond_first(self, value: Value) -> Self {
        self.responses.lock().unwrap().push_front(Ok(value));
        self
    }

    pub fn fail(self, err: rulescope_core::ExError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, request: &ApiRequest) -> Result<Value> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(transport_error(request.endpoint, "no scripted response")))
    }
}

/// What the fake backend saw
#[derive(Clone, Default)]
pub struct Recorded {
    pub queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    pub posts: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

/// A rules backend on an ephemeral port
pub struct FakeBackend {
    pub base_url: String,
    pub recorded: Recorded,
}

async fn info() -> Json<Value> {
    Json(catalog_json())
}

async fn rules(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let group = params.get("group").cloned().unwrap_or_default();
    recorded.queries.lock().unwrap().push(params);
    if group == "G2" {
        Json(pricing_json())
    } else {
        Json(validation_json())
    }
}

async fn rules_by_category(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.posts.lock().unwrap().push((headers, body));
    Json(pricing_json())
}

async fn ncube(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let name = params.get("name").cloned().unwrap_or_default();
    let app = params.get("appIdString").cloned().unwrap_or_default();
    recorded.queries.lock().unwrap().push(params);
    Json(json!({"html": format!("<h1>{} / {}</h1>", name, app)}))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}/", addr)
}

impl FakeBackend {
    /// A backend answering all four endpoints correctly
    pub async fn start() -> Self {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/ui/info", get(info))
            .route("/ui/rules", get(rules))
            .route("/ui/rulesByCategory", post(rules_by_category))
            .route("/ui/ncube", get(ncube))
            .with_state(recorded.clone());
        Self {
            base_url: spawn(app).await,
            recorded,
        }
    }

    /// A backend whose `ui/rules` answers 500
    pub async fn failing_rules() -> Self {
        let app = Router::new().route("/ui/info", get(info)).route(
            "/ui/rules",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "engine exploded") }),
        );
        Self {
            base_url: spawn(app).await,
            recorded: Recorded::default(),
        }
    }

    /// A backend whose `ui/rules` answers with text that is not JSON
    pub async fn garbled_rules() -> Self {
        let app = Router::new()
            .route("/ui/info", get(info))
            .route("/ui/rules", get(|| async { "<html>login</html>" }));
        Self {
            base_url: spawn(app).await,
            recorded: Recorded::default(),
        }
    }

    /// A backend whose `ui/rules` never answers in time
    pub async fn slow_rules(delay: Duration) -> Self {
        let app = Router::new().route("/ui/info", get(info)).route(
            "/ui/rules",
            get(move || async move {
                tokio::time::sleep(delay).await;
                Json(validation_json())
            }),
        );
        Self {
            base_url: spawn(app).await,
            recorded: Recorded::default(),
        }
    }
}
