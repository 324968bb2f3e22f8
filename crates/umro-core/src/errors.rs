use thiserror::Error;

/// Result type alias using UmroError
pub type Result<T> = std::result::Result<T, UmroError>;

/// Maximum number of characters of offending input carried in an error
const EXCERPT_LEN: usize = 64;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in the protocol layer maps to exactly one kind. Callers
/// branch on the kind (or on [`ExErrorKind::is_recoverable`]) instead of
/// matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    /// Malformed input XML
    Parse,
    /// Path expression failed to compile or evaluate
    Query,
    /// A required value or node is absent
    NotFound,
    /// A path matched more nodes than allowed
    Cardinality,
    /// A decoded field was malformed and replaced with a default
    Decode,
    /// A caller-supplied argument is unusable (absent node, bad tag name)
    InvalidArgument,
    /// Rendering a tree to text failed
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::Query => "ERR_QUERY",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Cardinality => "ERR_CARDINALITY",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether a caller can reasonably continue after this kind of failure
    ///
    /// `NotFound` is routinely turned into a domain error by the caller and
    /// `Decode` only ever describes a field that was already defaulted.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExErrorKind::NotFound | ExErrorKind::Decode)
    }
}

/// Canonical structured error type
///
/// A flattened view of an [`UmroError`] with the classification and the
/// context (operation, path expression, input excerpt) needed to log or
/// re-report it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    excerpt: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            excerpt: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the path expression that failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add an excerpt of the offending input
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(excerpt) = &self.excerpt {
            write!(f, " (input: {:?})", excerpt)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Failures raised by the document, query, codec and envelope layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UmroError {
    // ===== Parse Errors =====
    /// The XML parser rejected the input
    #[error("Failed to parse XML document: {message}")]
    Parse { message: String, excerpt: String },

    /// Input contained no '<' at all
    #[error("No XML markup found in input")]
    NoMarkup { excerpt: String },

    // ===== Query Errors =====
    /// Path expression failed to compile or evaluate
    #[error("The path '{path}' is not valid: {message}")]
    InvalidPath { path: String, message: String },

    /// Path expression evaluated to a boolean, number or string
    #[error("The path '{path}' did not evaluate to a node-set")]
    NotANodeSet { path: String },

    // ===== Lookup Errors =====
    /// Query was handed no context node
    #[error("Query was given an absent node with path '{path}'")]
    MissingNode { path: String },

    /// A required value had no match
    #[error("Expected to get a value with path '{path}' but found no matches")]
    ValueNotFound { path: String },

    /// A single node was required but none matched
    #[error("Did not find any nodes for path '{path}'")]
    NodeNotFound { path: String },

    /// A single node was required but several matched
    #[error("Found {count} nodes but expected only one for path '{path}'")]
    MultipleNodes { path: String, count: usize },

    // ===== Codec Errors =====
    /// `<Code>` text present but not an integer
    #[error("Exception code '{text}' is not an integer")]
    MalformedCode { text: String },

    // ===== Envelope Errors =====
    /// A tag name supplied for the envelope is not an XML name
    #[error("Invalid XML name for {role}: '{name}'")]
    InvalidXmlName { role: String, name: String },

    // ===== Output Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl UmroError {
    /// Classify this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            UmroError::Parse { .. } | UmroError::NoMarkup { .. } => ExErrorKind::Parse,
            UmroError::InvalidPath { .. } | UmroError::NotANodeSet { .. } => ExErrorKind::Query,
            UmroError::ValueNotFound { .. } | UmroError::NodeNotFound { .. } => {
                ExErrorKind::NotFound
            }
            UmroError::MultipleNodes { .. } => ExErrorKind::Cardinality,
            UmroError::MalformedCode { .. } => ExErrorKind::Decode,
            UmroError::MissingNode { .. } | UmroError::InvalidXmlName { .. } => {
                ExErrorKind::InvalidArgument
            }
            UmroError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }

    /// Path expression involved in the failure, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            UmroError::InvalidPath { path, .. }
            | UmroError::NotANodeSet { path }
            | UmroError::MissingNode { path }
            | UmroError::ValueNotFound { path }
            | UmroError::NodeNotFound { path }
            | UmroError::MultipleNodes { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn parse(message: impl Into<String>, input: &str) -> Self {
        UmroError::Parse {
            message: message.into(),
            excerpt: excerpt(input),
        }
    }

    pub(crate) fn no_markup(input: &str) -> Self {
        UmroError::NoMarkup {
            excerpt: excerpt(input),
        }
    }
}

/// Leading slice of `input`, cut on a char boundary
pub(crate) fn excerpt(input: &str) -> String {
    match input.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &input[..end]),
        None => input.to_string(),
    }
}

impl From<UmroError> for ExError {
    fn from(err: UmroError) -> Self {
        let message = err.to_string();
        let ex = ExError::new(err.kind()).with_message(message);

        match err {
            UmroError::Parse { excerpt, .. } | UmroError::NoMarkup { excerpt } => {
                ex.with_op("parse").with_excerpt(excerpt)
            }
            UmroError::InvalidPath { path, .. }
            | UmroError::NotANodeSet { path }
            | UmroError::MissingNode { path }
            | UmroError::ValueNotFound { path }
            | UmroError::NodeNotFound { path }
            | UmroError::MultipleNodes { path, .. } => ex.with_op("query").with_path(path),
            UmroError::MalformedCode { text } => ex.with_op("decode").with_excerpt(text),
            UmroError::InvalidXmlName { name, .. } => ex.with_op("envelope").with_excerpt(name),
            UmroError::Serialization { .. } => ex.with_op("serialize"),
        }
    }
}
