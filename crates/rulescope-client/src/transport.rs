//! Transport adapter: executes an `ApiRequest` against the backend
//!
//! The session only sees the `Transport` trait, so tests swap in an
//! in-memory implementation and the controller logic runs unchanged.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder};
use rulescope_core::{ApiRequest, Endpoint, Method};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::errors::{
    config_error, decode_error, http_status_error, timeout_error, transport_error, Result,
};

/// Something that can answer explorer requests with JSON documents
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the decoded JSON body
    ///
    /// # Errors
    ///
    /// Any failure to obtain a 2xx JSON answer: connection problems,
    /// timeouts, non-2xx statuses and undecodable bodies.
    async fn call(&self, request: &ApiRequest) -> Result<Value>;
}

/// HTTP transport backed by `reqwest`
///
/// GET bodies travel as query parameters; POST bodies as JSON with
/// `Content-Type` and `Accept` set to `application/json`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTransport {
    /// Build a transport for the configured backend
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.clone().normalized()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| config_error(&format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Full URL of an endpoint under the base URL
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn build(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.url(request.endpoint);
        match request.method {
            Method::Get => {
                let builder = self.client.get(&url).header(CACHE_CONTROL, "no-cache");
                let pairs = request.query_pairs();
                if pairs.is_empty() {
                    builder
                } else {
                    builder.query(&pairs)
                }
            }
            Method::Post => {
                let builder = self
                    .client
                    .post(&url)
                    .header(ACCEPT, "application/json");
                match request.json_body() {
                    Some(body) => builder.json(&body),
                    None => builder,
                }
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: &ApiRequest) -> Result<Value> {
        let endpoint = request.endpoint;
        tracing::debug!(
            method = request.method.as_str(),
            endpoint = endpoint.path(),
            "sending request"
        );

        let response = self.build(request).send().await.map_err(|e| {
            if e.is_timeout() {
                timeout_error(endpoint, self.timeout_ms)
            } else {
                transport_error(endpoint, e)
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                timeout_error(endpoint, self.timeout_ms)
            } else {
                transport_error(endpoint, e)
            }
        })?;

        if !status.is_success() {
            return Err(http_status_error(endpoint, status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| decode_error(endpoint, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_under_base() {
        let config = ClientConfig::default().with_base_url("http://rules:8080/app");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url(Endpoint::RulesByCategory),
            "http://rules:8080/app/ui/rulesByCategory"
        );
        assert_eq!(transport.url(Endpoint::Info), "http://rules:8080/app/ui/info");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = ClientConfig::default().with_base_url("  ");
        assert!(HttpTransport::new(&config).is_err());
    }
}
