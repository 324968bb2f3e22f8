use umro_core::text::{escape, escape_optional, unescape};

#[test]
fn test_escape_scenario() {
    assert_eq!(
        escape("<a> & \"b\" 'c'"),
        "&lt;a&gt; &amp; &quot;b&quot; &apos;c&apos;"
    );
}

#[test]
fn test_absent_input_stays_absent() {
    assert_eq!(escape_optional(None), None);
}

#[test]
fn test_empty_input() {
    assert_eq!(escape(""), "");
    assert_eq!(escape_optional(Some("")), Some(String::new()));
}

#[test]
fn test_ampersand_substituted_before_others() {
    // If '&' went last, "&lt;" would come out as "&amp;lt;"
    assert_eq!(escape("<"), "&lt;");
    assert_eq!(escape("a&b<c"), "a&amp;b&lt;c");
}

#[test]
fn test_escape_twice_double_escapes() {
    let once = escape("Tom & Jerry").into_owned();
    let twice = escape(&once).into_owned();
    assert_eq!(once, "Tom &amp; Jerry");
    assert_eq!(twice, "Tom &amp;amp; Jerry");
    assert_ne!(once, twice);
}

#[test]
fn test_unescape_inverts_escape() {
    for s in ["plain", "<a> & \"b\" 'c'", "a&&b", "x > y < z", "''\"\""] {
        assert_eq!(unescape(&escape(s)), s);
    }
}

#[test]
fn test_unescape_leaves_unknown_entities() {
    assert_eq!(unescape("&nbsp; &lt;"), "&nbsp; <");
}
