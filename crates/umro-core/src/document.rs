//! Parsing and serialization of small, fully materialized XML documents.
//!
//! Parsing and XPath evaluation run one at a time per process: every call
//! builds its own parser or evaluator, and all of them run under
//! [`XML_LOCK`]. Callers never share a live parser instance.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use sxd_document::dom::{self, ChildOfElement, ChildOfRoot};
use sxd_document::{parser, writer, Package};

use crate::errors::{Result, UmroError};
use crate::query::Node;
use crate::text::escape;
use crate::{log_op_end, log_op_error, log_op_start};

/// Process-wide critical section for parse and query evaluation
static XML_LOCK: Mutex<()> = Mutex::new(());

/// Enter the parse/query critical section.
///
/// The guarded state is `()`, so a poisoned lock carries nothing stale and
/// is simply taken over.
pub(crate) fn xml_lock() -> MutexGuard<'static, ()> {
    XML_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An owned, parsed XML document
///
/// Nodes handed out by [`Document::root`] and the query functions borrow
/// from the document and cannot outlive it.
pub struct Document {
    package: Package,
}

impl Document {
    /// Parse XML text into a document.
    ///
    /// Anything before the first `<` (log banners, stray output) is dropped.
    ///
    /// # Errors
    /// * `NoMarkup` - If the text contains no `<`
    /// * `Parse` - If the remaining text is not well-formed XML
    pub fn parse(text: &str) -> Result<Self> {
        let started = Instant::now();
        log_op_start!("parse", input_len = text.len());

        let result = parse_package(text).map(|package| Document { package });

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!("parse", duration_ms = duration_ms),
            Err(err) => log_op_error!("parse", err.clone(), duration_ms = duration_ms),
        }
        result
    }

    /// The document (root) node
    pub fn root(&self) -> Node<'_> {
        self.package.as_document().root().into()
    }

    /// The outermost element, if the document has one
    pub fn document_element(&self) -> Option<Node<'_>> {
        self.package
            .as_document()
            .root()
            .children()
            .into_iter()
            .find_map(|child| match child {
                ChildOfRoot::Element(element) => Some(Node::Element(element)),
                _ => None,
            })
    }

    /// Serialize the whole document
    ///
    /// # Errors
    /// * `Serialization` - If the writer fails
    pub fn to_xml(&self) -> Result<String> {
        serialize(self.root())
    }

    pub(crate) fn as_dom(&self) -> dom::Document<'_> {
        self.package.as_document()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

impl std::str::FromStr for Document {
    type Err = UmroError;

    fn from_str(text: &str) -> Result<Self> {
        Document::parse(text)
    }
}

/// Parse XML text into a document. See [`Document::parse`].
///
/// # Errors
/// * `NoMarkup` - If the text contains no `<`
/// * `Parse` - If the text is not well-formed XML
pub fn parse(text: &str) -> Result<Document> {
    Document::parse(text)
}

fn parse_package(text: &str) -> Result<Package> {
    let start = text.find('<').ok_or_else(|| UmroError::no_markup(text))?;
    let markup = &text[start..];

    let _guard = xml_lock();
    parser::parse(markup).map_err(|e| UmroError::parse(format!("{:?}", e), markup))
}

/// Render `node` and its subtree as a standalone XML document.
///
/// The node (the document node or an element) is copied into a fresh
/// document, which is then written out. Text, attribute and other leaf nodes render
/// as their escaped string value. Formatting may differ from the parsed
/// input, but the output always re-parses to an equivalent tree.
///
/// # Errors
/// * `Serialization` - If the writer fails or emits invalid UTF-8
pub fn serialize(node: Node<'_>) -> Result<String> {
    let package = Package::new();
    let target = package.as_document();

    match node {
        Node::Root(root) => {
            for child in root.children() {
                match child {
                    ChildOfRoot::Element(element) => {
                        target.root().append_child(copy_element(element, &target));
                    }
                    ChildOfRoot::Comment(comment) => {
                        target.root().append_child(target.create_comment(comment.text()));
                    }
                    ChildOfRoot::ProcessingInstruction(pi) => {
                        target
                            .root()
                            .append_child(target.create_processing_instruction(pi.target(), pi.value()));
                    }
                }
            }
        }
        Node::Element(element) => {
            target.root().append_child(copy_element(element, &target));
        }
        other => return Ok(escape(&other.string_value()).into_owned()),
    }

    let started = Instant::now();
    let text = write_document(&target)?;
    tracing::debug!(
        component = module_path!(),
        op = "serialize",
        duration_ms = started.elapsed().as_millis() as u64,
        output_len = text.len(),
    );
    Ok(text)
}

fn write_document(document: &dom::Document<'_>) -> Result<String> {
    let mut buffer = Vec::new();
    writer::format_document(document, &mut buffer).map_err(|e| UmroError::Serialization {
        message: e.to_string(),
    })?;
    String::from_utf8(buffer).map_err(|e| UmroError::Serialization {
        message: e.to_string(),
    })
}

/// Deep-copy `source` into `target`, returning the unattached copy
fn copy_element<'t>(source: dom::Element<'_>, target: &dom::Document<'t>) -> dom::Element<'t> {
    let copy = target.create_element(source.name());
    for attribute in source.attributes() {
        copy.set_attribute_value(attribute.name(), attribute.value());
    }
    for child in source.children() {
        match child {
            ChildOfElement::Element(element) => {
                copy.append_child(copy_element(element, target));
            }
            ChildOfElement::Text(text) => {
                copy.append_child(target.create_text(text.text()));
            }
            ChildOfElement::Comment(comment) => {
                copy.append_child(target.create_comment(comment.text()));
            }
            ChildOfElement::ProcessingInstruction(pi) => {
                copy.append_child(target.create_processing_instruction(pi.target(), pi.value()));
            }
        }
    }
    copy
}
