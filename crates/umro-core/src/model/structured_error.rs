use serde::{Deserialize, Serialize};

use crate::text::to_xml_name;

/// Code carried by an error that was never assigned one
pub const UNDEFINED_CODE: i64 = -1;

/// Type name used when the caller does not supply one
pub const DEFAULT_NAME: &str = "StructuredError";

/// A user-facing error report
///
/// Carries the four user-facing texts (what happened, how far it reaches,
/// what to do, anything else), an optional developer-facing message, a
/// numeric code and the name of the error kind that produced it.
///
/// Values are immutable; the `with_*` methods return a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: i64,
    pub what: String,
    pub scope: String,
    pub action: String,
    pub more: String,
    pub programmer_message: Option<String>,
    pub name: String,
}

impl StructuredError {
    /// Create a fully populated error
    pub fn new(
        code: i64,
        what: impl Into<String>,
        scope: impl Into<String>,
        action: impl Into<String>,
        more: impl Into<String>,
        programmer_message: Option<String>,
    ) -> Self {
        Self {
            code,
            what: what.into(),
            scope: scope.into(),
            action: action.into(),
            more: more.into(),
            programmer_message,
            name: DEFAULT_NAME.to_string(),
        }
    }

    /// An error that only carries a developer-facing message
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(UNDEFINED_CODE, "", "", "", "", Some(message.into()))
    }

    /// Wrap an arbitrary error that has no structured fields.
    ///
    /// The code is undefined, the user-facing texts are empty, the programmer
    /// message is the error's own description, and the name is the Rust type
    /// name of `E` made into an XML name (see [`to_xml_name`]).
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::from_message(err.to_string()).with_name(to_xml_name(std::any::type_name::<E>()))
    }

    /// Replace the originating type name.
    ///
    /// Meant for identifier-shaped names; anything else is escaped when
    /// encoded.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn with_programmer_message(mut self, message: impl Into<String>) -> Self {
        self.programmer_message = Some(message.into());
        self
    }

    /// Append the `source()` chain of `cause` to the programmer message,
    /// one `caused by:` line per link.
    pub fn with_cause(mut self, cause: &(dyn std::error::Error + 'static)) -> Self {
        let mut rendered = self.programmer_message.take().unwrap_or_default();
        let mut current = Some(cause);
        while let Some(err) = current {
            if !rendered.is_empty() {
                rendered.push('\n');
            }
            rendered.push_str("caused by: ");
            rendered.push_str(&err.to_string());
            current = err.source();
        }
        self.programmer_message = Some(rendered);
        self
    }

    /// Whether a code was ever assigned
    pub fn has_code(&self) -> bool {
        self.code != UNDEFINED_CODE
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.name,
            self.programmer_message.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for StructuredError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "write failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_message_defaults() {
        let err = StructuredError::from_message("boom");
        assert_eq!(err.code, UNDEFINED_CODE);
        assert!(!err.has_code());
        assert!(err.what.is_empty());
        assert_eq!(err.programmer_message.as_deref(), Some("boom"));
        assert_eq!(err.name, DEFAULT_NAME);
    }

    #[test]
    fn test_from_error_uses_type_name() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = StructuredError::from_error(&io);
        assert_eq!(err.programmer_message.as_deref(), Some("disk"));
        assert!(err.name.ends_with("Error"));
        assert!(err.name.contains("io"));
    }

    #[derive(Debug)]
    struct Wrapped<T>(T);

    impl<T: std::fmt::Debug> std::fmt::Display for Wrapped<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "wrapped {:?}", self.0)
        }
    }

    impl<T: std::fmt::Debug> std::error::Error for Wrapped<T> {}

    #[test]
    fn test_from_error_generic_type_gives_xml_name() {
        let err = StructuredError::from_error(&Wrapped(3u8));
        assert!(crate::text::is_xml_name(&err.name), "{}", err.name);
        assert!(err.name.ends_with("Wrapped"));
        assert_eq!(err.programmer_message.as_deref(), Some("wrapped 3"));
    }

    #[test]
    fn test_from_error_trait_object_gives_xml_name() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "lost".into();
        let err = StructuredError::from_error(&*boxed);
        assert!(crate::text::is_xml_name(&err.name), "{}", err.name);
        assert!(!err.name.contains("dyn"));
        assert!(!err.name.contains("Send"));
        assert_eq!(err.programmer_message.as_deref(), Some("lost"));
    }

    #[test]
    fn test_with_cause_renders_chain() {
        let outer = Outer(std::io::Error::new(std::io::ErrorKind::Other, "no space"));
        let err = StructuredError::from_message("save failed").with_cause(&outer);
        assert_eq!(
            err.programmer_message.as_deref(),
            Some("save failed\ncaused by: write failed\ncaused by: no space")
        );
    }

    #[test]
    fn test_display() {
        let err = StructuredError::from_message("boom").with_name("DiskError");
        assert_eq!(err.to_string(), "DiskError: boom");
    }

    #[test]
    fn test_serde_round_trip() {
        let err = StructuredError::new(7, "a", "b", "c", "d", None);
        let json = serde_json::to_string(&err).unwrap();
        let back: StructuredError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
