pub mod structured_error;

pub use structured_error::{StructuredError, DEFAULT_NAME, UNDEFINED_CODE};
