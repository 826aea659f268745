//! Structured logging for rulescope
//!
//! Binaries call [`init`] once with a [`Profile`]. Library code reports the
//! lifecycle of each operation through the `log_op_*` macros, so every line
//! carries the same `component`, `op` and `event` fields. Tests install the
//! in-memory [`TestCapture`] layer instead and assert on what was recorded.
//!
//! ```
//! use rulescope_core::logging_facility::{init, Profile};
//! use rulescope_core::{log_op_end, log_op_start};
//!
//! init(Profile::Test);
//! log_op_start!("load_catalog");
//! log_op_end!("load_catalog", duration_ms = 3);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
