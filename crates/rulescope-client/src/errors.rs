//! Error handling for rulescope-client
//!
//! Wraps rulescope-core ExError with transport and configuration helpers

use rulescope_core::errors::{ExError, ExErrorKind};
use rulescope_core::Endpoint;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a transport error (connection refused, reset, DNS, ...)
pub fn transport_error(endpoint: Endpoint, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Transport)
        .with_op("transport_call")
        .with_endpoint(endpoint.path())
        .with_message(err.to_string())
}

/// Create a timeout error
pub fn timeout_error(endpoint: Endpoint, timeout_ms: u64) -> ExError {
    ExError::new(ExErrorKind::Timeout)
        .with_op("transport_call")
        .with_endpoint(endpoint.path())
        .with_message(format!("No response within {} ms", timeout_ms))
}

/// Create an error for a non-2xx response
pub fn http_status_error(endpoint: Endpoint, status: u16, body: &str) -> ExError {
    let message = if body.is_empty() {
        format!("Server answered {}", status)
    } else {
        format!("Server answered {}: {}", status, body)
    };
    ExError::new(ExErrorKind::ExternalService)
        .with_op("transport_call")
        .with_endpoint(endpoint.path())
        .with_status(status)
        .with_message(message)
}

/// Create an error for a response body that is not the expected document
pub fn decode_error(endpoint: Endpoint, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("decode_response")
        .with_endpoint(endpoint.path())
        .with_message(err.to_string())
}

/// Create a configuration error
pub fn config_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
