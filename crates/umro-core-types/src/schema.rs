//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the code that emits
//! events and the tests or collectors that read them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Protocol context
pub const FIELD_PATH: &str = "path";
pub const FIELD_SERVICE: &str = "service";
pub const FIELD_METHOD: &str = "method";
pub const FIELD_CODE: &str = "code";
pub const FIELD_CODE_TEXT: &str = "code_text";

// Sizes
pub const FIELD_INPUT_LEN: &str = "input_len";
pub const FIELD_OUTPUT_LEN: &str = "output_len";
pub const FIELD_REWRITTEN: &str = "rewritten";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DEGRADED: &str = "degraded";
