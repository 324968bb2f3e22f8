//! UMRO Core - structured error reports as self-describing XML
//!
//! This crate maps typed, user-facing error values to a canonical
//! `<Exception>` fragment and back, and wraps fragments in a timestamped
//! `<UMROEnvelope>` for transport. It includes:
//! - Special-character escaping and non-printable character sanitizing
//! - Thread-safe parsing and serialization of small XML documents
//! - XPath queries with explicit cardinality failures
//! - The `<Exception>` codec and the envelope builder/reader
//!
//! ```
//! use umro_core::{codec, StructuredError};
//!
//! let err = StructuredError::new(42, "Disk full", "Node-7", "Retry", "", None);
//! let fragment = codec::encode(&err);
//! assert!(fragment.contains("<What>Disk full</What>"));
//!
//! let back = codec::decode_str(&fragment)?;
//! assert_eq!(back.what, "Disk full");
//! # Ok::<(), umro_core::UmroError>(())
//! ```

pub mod codec;
pub mod document;
pub mod envelope;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod query;
pub mod text;

#[doc(hidden)]
pub use tracing;
#[doc(hidden)]
pub use umro_core_types;

// Re-export commonly used types
pub use document::{parse, serialize, Document};
pub use envelope::{build_response, Envelope, EnvelopeInfo};
pub use errors::{ExError, ExErrorKind, Result, UmroError};
pub use model::{StructuredError, UNDEFINED_CODE};
pub use query::{
    get_multiple_nodes, get_required_value, get_single_node, get_value, Node, NodeSet,
};
