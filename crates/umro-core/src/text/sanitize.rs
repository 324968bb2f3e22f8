//! Non-printable character replacement over text and parsed trees.

use std::borrow::Cow;

use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};

use crate::document::Document;

/// Printable ASCII plus carriage return, line feed and tab.
pub fn is_regular_char(c: char) -> bool {
    matches!(c, ' '..='~' | '\r' | '\n' | '\t')
}

/// Replace every character that is not [`is_regular_char`] with `replacement`.
///
/// Each offending character becomes exactly one `replacement`, whatever its
/// UTF-8 width.
///
/// ```
/// use umro_core::text::sanitize_text;
///
/// assert_eq!(sanitize_text("aa\x06bb\tcc", '?'), "aa?bb\tcc");
/// ```
pub fn sanitize_text(value: &str, replacement: char) -> Cow<'_, str> {
    if value.chars().all(is_regular_char) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .chars()
            .map(|c| if is_regular_char(c) { c } else { replacement })
            .collect(),
    )
}

/// Sanitize every attribute value, text node and comment in `document`.
///
/// Returns how many values actually changed. Applying it a second time with
/// the same `replacement` changes nothing and returns `0`, whether or not the
/// replacement is itself a regular character.
pub fn sanitize(document: &mut Document, replacement: char) -> usize {
    let dom = document.as_dom();
    let mut rewritten = 0;

    for child in dom.root().children() {
        match child {
            ChildOfRoot::Element(element) => {
                rewritten += sanitize_element(element, replacement);
            }
            ChildOfRoot::Comment(comment) => {
                if let Some(clean) = changed(comment.text(), replacement) {
                    comment.set_text(&clean);
                    rewritten += 1;
                }
            }
            ChildOfRoot::ProcessingInstruction(_) => {}
        }
    }

    tracing::debug!(
        component = module_path!(),
        op = "sanitize",
        rewritten = rewritten,
    );
    rewritten
}

fn sanitize_element(element: Element<'_>, replacement: char) -> usize {
    let mut rewritten = 0;

    for attribute in element.attributes() {
        if let Some(clean) = changed(attribute.value(), replacement) {
            element.set_attribute_value(attribute.name(), &clean);
            rewritten += 1;
        }
    }

    for child in element.children() {
        match child {
            ChildOfElement::Element(child) => {
                rewritten += sanitize_element(child, replacement);
            }
            ChildOfElement::Text(text) => {
                if let Some(clean) = changed(text.text(), replacement) {
                    text.set_text(&clean);
                    rewritten += 1;
                }
            }
            ChildOfElement::Comment(comment) => {
                if let Some(clean) = changed(comment.text(), replacement) {
                    comment.set_text(&clean);
                    rewritten += 1;
                }
            }
            ChildOfElement::ProcessingInstruction(_) => {}
        }
    }

    rewritten
}

/// Sanitized form of `value`, if it differs from `value`
fn changed(value: &str, replacement: char) -> Option<String> {
    match sanitize_text(value, replacement) {
        Cow::Owned(clean) if clean != value => Some(clean),
        _ => None,
    }
}
