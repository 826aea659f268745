//! Per-call correlation ids
//!
//! A user who flips quickly between groups can have several rule queries in
//! flight. Each server call is stamped with a `RequestId` so that its `start`
//! event, its `end` or `end_error` event and any error it surfaces can be
//! matched up afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the abbreviated form shown to humans
const SHORT_LEN: usize = 8;

/// Identifier of one server call
///
/// Generated as a UUIDv7, so ids sort by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an id received from elsewhere (a log line, a test fixture)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Trailing characters of the id, enough to tell concurrent calls apart
    /// in terminal output
    pub fn short(&self) -> &str {
        let start = self.0.len().saturating_sub(SHORT_LEN);
        self.0.get(start..).unwrap_or(&self.0)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
