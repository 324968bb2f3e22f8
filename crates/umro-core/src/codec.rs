//! `<Exception>` fragment encoding and decoding.
//!
//! Encoded layout:
//!
//! ```text
//! <Exception Code='42' Name='DiskError'>
//!   <Code>42</Code>
//!   <UserMessage>
//!     <What>Disk full</What>
//!     <Scope>Node-7</Scope>
//!     <Action>Retry</Action>
//!     <More></More>
//!   </UserMessage>
//!   <ProgrammerMessage>IOException: disk</ProgrammerMessage>
//! </Exception>
//! ```
//!
//! The `Code` attribute is left out for [`UNDEFINED_CODE`]; the `<Code>`
//! element is always written. Decoding does not give the sentinel back: an
//! undefined code reads back as `0`, the same as a missing `<Code>`.

use std::time::Instant;

use crate::document::{serialize, Document};
use crate::errors::{Result, UmroError};
use crate::model::{StructuredError, UNDEFINED_CODE};
use crate::query::{get_attribute_value, get_multiple_nodes, get_value, Node};
use crate::text::escape;
use crate::{log_op_end, log_op_start};

const CODE_PATH: &str = "Code/text()";
const WHAT_PATH: &str = "UserMessage/What/text()";
const SCOPE_PATH: &str = "UserMessage/Scope/text()";
const ACTION_PATH: &str = "UserMessage/Action/text()";
const MORE_PATH: &str = "UserMessage/More/text()";
const PROGRAMMER_MESSAGE_PATH: &str = "ProgrammerMessage/text()";

/// Code given to a decoded error whose `<Code>` is absent
const DEFAULT_DECODED_CODE: i64 = 0;

/// Result of decoding, with any fields that had to be defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub value: StructuredError,
    /// Serialized form of the node that was decoded
    pub fragment: String,
    /// Non-fatal problems, all of kind `Decode`
    pub warnings: Vec<UmroError>,
}

/// Render `error` as an `<Exception>` fragment.
pub fn encode(error: &StructuredError) -> String {
    let code_attribute = if error.code == UNDEFINED_CODE {
        String::new()
    } else {
        format!(" Code='{}'", error.code)
    };
    let programmer_message = error
        .programmer_message
        .as_deref()
        .map(escape)
        .unwrap_or_default();

    format!(
        "<Exception{code_attribute} Name='{name}'>\n\
         \x20 <Code>{code}</Code>\n\
         \x20 <UserMessage>\n\
         \x20   <What>{what}</What>\n\
         \x20   <Scope>{scope}</Scope>\n\
         \x20   <Action>{action}</Action>\n\
         \x20   <More>{more}</More>\n\
         \x20 </UserMessage>\n\
         \x20 <ProgrammerMessage>{programmer_message}</ProgrammerMessage>\n\
         </Exception>",
        name = escape(&error.name),
        code = error.code,
        what = escape(&error.what),
        scope = escape(&error.scope),
        action = escape(&error.action),
        more = escape(&error.more),
    )
}

/// Rebuild a [`StructuredError`] from an `<Exception>` element.
///
/// Missing elements give empty fields. A `<Code>` that is not an integer
/// (surrounding whitespace included) gives code `-1` and is logged, never
/// returned as an error.
///
/// # Errors
/// * `MissingNode` - If `node` is `None`
/// * `Serialization` - If the node cannot be rendered for the log record
pub fn decode<'d>(node: impl Into<Option<Node<'d>>>) -> Result<StructuredError> {
    decode_with_diagnostics(node).map(|decoded| decoded.value)
}

/// [`decode`], also returning the source fragment and any degraded fields.
///
/// # Errors
/// Same as [`decode`].
pub fn decode_with_diagnostics<'d>(node: impl Into<Option<Node<'d>>>) -> Result<Decoded> {
    let started = Instant::now();
    let node = node.into().ok_or_else(|| UmroError::MissingNode {
        path: CODE_PATH.to_string(),
    })?;
    log_op_start!("decode");

    let mut warnings = Vec::new();
    let code = match get_value(node, CODE_PATH)? {
        None => DEFAULT_DECODED_CODE,
        Some(text) => match text.parse::<i64>() {
            Ok(UNDEFINED_CODE) => DEFAULT_DECODED_CODE,
            Ok(code) => code,
            Err(_) => {
                tracing::warn!(
                    component = module_path!(),
                    op = "decode",
                    event = umro_core_types::schema::EVENT_DEGRADED,
                    code_text = text.as_str(),
                );
                warnings.push(UmroError::MalformedCode { text });
                UNDEFINED_CODE
            }
        },
    };

    let value = StructuredError {
        code,
        what: text_at(node, WHAT_PATH)?.unwrap_or_default(),
        scope: text_at(node, SCOPE_PATH)?.unwrap_or_default(),
        action: text_at(node, ACTION_PATH)?.unwrap_or_default(),
        more: text_at(node, MORE_PATH)?.unwrap_or_default(),
        programmer_message: text_at(node, PROGRAMMER_MESSAGE_PATH)?,
        name: get_attribute_value(node, "Name").unwrap_or_default(),
    };
    let fragment = serialize(node)?;

    log_op_end!(
        "decode",
        duration_ms = started.elapsed().as_millis() as u64,
        code = value.code
    );
    Ok(Decoded {
        value,
        fragment,
        warnings,
    })
}

/// Parse `text` and decode its document element.
///
/// # Errors
/// * Any parse error of [`Document::parse`]
/// * `NodeNotFound` - If the document has no element
pub fn decode_str(text: &str) -> Result<StructuredError> {
    let document = Document::parse(text)?;
    let element = document
        .document_element()
        .ok_or_else(|| UmroError::NodeNotFound {
            path: "/*".to_string(),
        })?;
    decode(element)
}

/// Text selected by `path`, joining adjacent text nodes
fn text_at(node: Node<'_>, path: &str) -> Result<Option<String>> {
    let nodes = get_multiple_nodes(node, path)?;
    if nodes.is_empty() {
        return Ok(None);
    }
    Ok(Some(nodes.iter().map(|n| n.string_value()).collect()))
}
