//! Text-level transformations applied before markup is assembled or after a
//! tree is parsed.
//!
//! - [`escape`]: reserved-character escaping for text spliced into markup
//! - [`sanitize`]: replacement of non-printable characters in a parsed tree
//! - [`to_xml_name`]: type names made safe for use as XML names

pub mod escape;
pub mod name;
pub mod sanitize;

pub use escape::{escape, escape_optional, unescape};
pub use name::{is_xml_name, to_xml_name};
pub use sanitize::{is_regular_char, sanitize, sanitize_text};
