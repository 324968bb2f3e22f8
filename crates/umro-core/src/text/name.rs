//! XML `NCName` checks, and turning Rust type names into such names.

/// Check `name` against the XML `NCName` production (a `Name` without ':')
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Turn a Rust type name into an `NCName`.
///
/// Generic arguments are dropped and a trait object keeps only its trait
/// path. Every remaining character outside the `NCName` alphabet becomes
/// `_`, and a leading `_` is added if the first character cannot start a
/// name.
///
/// ```
/// use umro_core::text::to_xml_name;
///
/// assert_eq!(to_xml_name("app::Wrapped<u8>"), "app__Wrapped");
/// assert_eq!(to_xml_name("dyn core::error::Error + core::marker::Send"), "core__error__Error");
/// ```
pub fn to_xml_name(type_name: &str) -> String {
    let base = type_name.trim().trim_start_matches("dyn ");
    let base = base
        .split(|c: char| c == '<' || c == '+' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    let mut name: String = base
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    if !name.chars().next().is_some_and(is_name_start_char) {
        name.insert(0, '_');
    }
    name
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}
