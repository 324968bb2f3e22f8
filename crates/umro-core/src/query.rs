//! XPath queries against parsed documents.
//!
//! Four cardinality flavours over one evaluator:
//!
//! | function               | 0 matches        | 1 match | 2+ matches         |
//! |------------------------|------------------|---------|--------------------|
//! | [`get_value`]          | `Ok(None)`       | value   | first value        |
//! | [`get_required_value`] | `ValueNotFound`  | value   | first value        |
//! | [`get_multiple_nodes`] | empty set        | set     | set                |
//! | [`get_single_node`]    | `NodeNotFound`   | node    | `MultipleNodes`    |
//!
//! Context nodes are accepted as `impl Into<Option<Node>>`, so an absent
//! node (`None`) is reported as `MissingNode` instead of panicking.
//! Evaluation runs under the same process-wide lock as parsing.

use sxd_xpath::{Context, Factory, Value};

use crate::document::xml_lock;
use crate::errors::{Result, UmroError};

pub use sxd_xpath::nodeset::Node;

/// Nodes matched by a path expression, in document order
pub type NodeSet<'d> = Vec<Node<'d>>;

/// String value of the first node matched by `path`, or `None` when nothing
/// matches.
///
/// The path usually ends in `text()` or selects an attribute.
///
/// # Errors
/// * `MissingNode` - If `node` is `None`
/// * `InvalidPath` / `NotANodeSet` - If the path fails to compile or evaluate
pub fn get_value<'d>(node: impl Into<Option<Node<'d>>>, path: &str) -> Result<Option<String>> {
    let nodes = get_multiple_nodes(node, path)?;
    Ok(nodes.first().map(|n| n.string_value()))
}

/// Like [`get_value`], but a missing value is an error.
///
/// # Errors
/// * `ValueNotFound` - If nothing matches
/// * Any error of [`get_value`]
pub fn get_required_value<'d>(node: impl Into<Option<Node<'d>>>, path: &str) -> Result<String> {
    get_value(node, path)?.ok_or_else(|| {
        tracing::debug!(component = module_path!(), op = "get_required_value", path = path);
        UmroError::ValueNotFound {
            path: path.to_string(),
        }
    })
}

/// Every node matched by `path`. An empty set is a normal outcome.
///
/// # Errors
/// * `MissingNode` - If `node` is `None`
/// * `InvalidPath` - If the path fails to compile or evaluate
/// * `NotANodeSet` - If the path evaluates to a boolean, number or string
pub fn get_multiple_nodes<'d>(node: impl Into<Option<Node<'d>>>, path: &str) -> Result<NodeSet<'d>> {
    let node = node.into().ok_or_else(|| UmroError::MissingNode {
        path: path.to_string(),
    })?;

    let _guard = xml_lock();
    evaluate_nodeset(node, path).inspect_err(|err| {
        tracing::debug!(
            component = module_path!(),
            op = "get_multiple_nodes",
            path = path,
            err.code = err.kind().code(),
        );
    })
}

/// The one node matched by `path`.
///
/// # Errors
/// * `NodeNotFound` - If nothing matches
/// * `MultipleNodes` - If more than one node matches
/// * Any error of [`get_multiple_nodes`]
pub fn get_single_node<'d>(node: impl Into<Option<Node<'d>>>, path: &str) -> Result<Node<'d>> {
    let mut nodes = get_multiple_nodes(node, path)?;
    match nodes.len() {
        0 => Err(UmroError::NodeNotFound {
            path: path.to_string(),
        }),
        1 => Ok(nodes.remove(0)),
        count => Err(UmroError::MultipleNodes {
            path: path.to_string(),
            count,
        }),
    }
}

/// Value of attribute `name` on an element node, without going through XPath.
///
/// Returns `None` for non-element nodes and for missing attributes.
pub fn get_attribute_value(node: Node<'_>, name: &str) -> Option<String> {
    match node {
        Node::Element(element) => element.attribute_value(name).map(str::to_string),
        _ => None,
    }
}

/// Local name of an element node
pub fn element_name(node: Node<'_>) -> Option<String> {
    match node {
        Node::Element(element) => Some(element.name().local_part().to_string()),
        _ => None,
    }
}

fn evaluate_nodeset<'d>(node: Node<'d>, path: &str) -> Result<NodeSet<'d>> {
    let invalid = |message: String| UmroError::InvalidPath {
        path: path.to_string(),
        message,
    };

    let factory = Factory::new();
    let xpath = factory
        .build(path)
        .map_err(|e| invalid(format!("{:?}", e)))?
        .ok_or_else(|| invalid("empty expression".to_string()))?;

    let context = Context::new();
    match xpath
        .evaluate(&context, node)
        .map_err(|e| invalid(format!("{:?}", e)))?
    {
        Value::Nodeset(nodes) => Ok(nodes.document_order()),
        _ => Err(UmroError::NotANodeSet {
            path: path.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_relative_to_element() {
        let doc = Document::parse("<a><b>1</b><b>2</b></a>").unwrap();
        let a = doc.document_element().unwrap();
        let nodes = get_multiple_nodes(a, "b").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].string_value(), "2");
    }

    #[test]
    fn test_empty_expression_is_query_error() {
        let doc = Document::parse("<a/>").unwrap();
        let err = get_value(doc.root(), "").unwrap_err();
        assert!(matches!(err, UmroError::InvalidPath { .. }));
    }

    #[test]
    fn test_scalar_result_is_not_a_nodeset() {
        let doc = Document::parse("<a><b/></a>").unwrap();
        let err = get_multiple_nodes(doc.root(), "count(//b)").unwrap_err();
        assert!(matches!(err, UmroError::NotANodeSet { .. }));
    }

    #[test]
    fn test_attribute_helpers() {
        let doc = Document::parse("<a Name='x'/>").unwrap();
        let a = doc.document_element().unwrap();
        assert_eq!(get_attribute_value(a, "Name").as_deref(), Some("x"));
        assert_eq!(get_attribute_value(a, "Other"), None);
        assert_eq!(get_attribute_value(doc.root(), "Name"), None);
        assert_eq!(element_name(a).as_deref(), Some("a"));
    }
}
