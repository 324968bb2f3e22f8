//! Special-character escaping.
//!
//! Substitutions are applied one table entry at a time. `&` must stay at
//! the head of [`SPECIAL_CHARS`]: any later position would re-escape the
//! ampersands introduced by the other entries.

use std::borrow::Cow;

/// Reserved characters and their entity forms, in substitution order
const SPECIAL_CHARS: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

/// Replace the five reserved XML characters with their named entities.
///
/// Returns the input unchanged (borrowed) when it contains none of them.
///
/// ```
/// use umro_core::text::escape;
///
/// assert_eq!(
///     escape("<a> & \"b\" 'c'"),
///     "&lt;a&gt; &amp; &quot;b&quot; &apos;c&apos;"
/// );
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    let mut value = Cow::Borrowed(text);
    for (special, entity) in SPECIAL_CHARS {
        if value.contains(special) {
            value = Cow::Owned(value.replace(special, entity));
        }
    }
    value
}

/// [`escape`] lifted over an optional value: `None` stays `None`.
pub fn escape_optional(text: Option<&str>) -> Option<String> {
    text.map(|t| escape(t).into_owned())
}

/// Inverse of [`escape`].
///
/// `&amp;` is substituted last so that `&amp;lt;` comes back as `&lt;`.
/// Exact only for text that held no entity-like substrings before escaping.
pub fn unescape(text: &str) -> Cow<'_, str> {
    let mut value = Cow::Borrowed(text);
    for (special, entity) in SPECIAL_CHARS.iter().rev() {
        if value.contains(entity) {
            value = Cow::Owned(value.replace(entity, &special.to_string()));
        }
    }
    value
}
