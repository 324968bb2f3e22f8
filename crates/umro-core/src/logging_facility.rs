//! Structured operation logging.
//!
//! Library code reports through [`log_op_start!`](crate::log_op_start),
//! [`log_op_end!`](crate::log_op_end) and
//! [`log_op_error!`](crate::log_op_error) using the field names in
//! `umro_core_types::schema`. Binaries call [`init`] once; tests use
//! [`init_test_capture`] to inspect what was emitted.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
