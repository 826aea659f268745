//! Names shared by every structured log line
//!
//! Operation events carry `component`, `op` and `event`. Server calls add
//! `request_id` and `endpoint`. Failures add `err_kind` and `err_code`.
//! The capture layer used in tests reads events back through the same names.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// server calls
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_ENDPOINT: &str = "endpoint";

// failures
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

/// Operation began
pub const EVENT_START: &str = "start";
/// Operation finished and its result was applied
pub const EVENT_END: &str = "end";
/// Operation failed; the line also carries the error fields
pub const EVENT_END_ERROR: &str = "end_error";
/// Nothing to do, e.g. the empty group was selected
pub const EVENT_SKIP: &str = "skip";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_values_are_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR, EVENT_SKIP];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_fields_use_flat_names() {
        assert!(!FIELD_ERR_KIND.contains('.'));
        assert!(!FIELD_ERR_CODE.contains('.'));
    }
}
