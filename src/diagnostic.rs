//! Reporting of structural defects found while parsing.
//!
//! The parser never fails on malformed markup. It truncates whatever could not
//! be understood and reports a [`Diagnostic`] to a [`DiagnosticSink`] instead.
//! Pass a `Vec<Diagnostic>` to collect them, or a [`TracingSink`] to log them.

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Something was skipped, but the surrounding structure is intact
    Warning,

    /// A construct could not be parsed and was dropped or truncated
    Error,
}
impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A structural defect in the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Defect {
    /// The document does not begin with `<?xml`
    #[error("Document does not begin with an <?xml declaration")]
    MissingInstruction,

    /// The `<?xml` declaration has no closing `?>`
    #[error("The <?xml declaration is not terminated with ?>")]
    UnterminatedInstruction,

    /// The `<?xml` declaration has no attributes
    #[error("The <?xml declaration has no attributes")]
    EmptyInstruction,

    /// A second processing instruction was found where the root element was expected
    #[error("Unexpected processing instruction where the root element was expected")]
    UnexpectedInstruction,

    /// No root element was found
    #[error("No root element found")]
    MissingRoot,

    /// Markup follows the root element
    #[error("Ignoring content after the root element")]
    TrailingContent,

    /// A tag has no closing `>`
    #[error("Unterminated tag")]
    UnterminatedTag,

    /// A tag has an empty name
    #[error("Tag has no name")]
    MissingTagName,

    /// A closing tag appeared where an element was expected
    #[error("Unexpected closing tag: </{0}>")]
    UnexpectedClosingTag(String),

    /// An element is never closed
    #[error("Missing closing tag: </{0}>")]
    MissingClosingTag(String),

    /// An element holds both text and nested elements; the text is dropped
    #[error("Element <{0}> mixes text with nested elements; the text was dropped")]
    MixedContent(String),

    /// An `=` is not preceded by an attribute name
    #[error("Attribute has no name")]
    MissingAttributeName,

    /// An attribute value does not start with `"`
    #[error("Value of attribute `{0}` is not quoted")]
    UnquotedAttributeValue(String),

    /// An attribute value has no closing `"`
    #[error("Value of attribute `{0}` is not terminated")]
    UnterminatedAttributeValue(String),

    /// An element is nested deeper than the configured limit
    #[error("Element <{name}> exceeds the maximum nesting depth of {limit}")]
    DepthLimitExceeded {
        /// The element whose children were dropped
        name: String,

        /// The configured limit
        limit: usize,
    },
}
impl Defect {
    /// The severity this defect is reported with.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingInstruction
            | Self::EmptyInstruction
            | Self::TrailingContent
            | Self::MixedContent(_)
            | Self::MissingAttributeName
            | Self::UnquotedAttributeValue(_)
            | Self::UnterminatedAttributeValue(_) => Severity::Warning,

            Self::UnterminatedInstruction
            | Self::UnexpectedInstruction
            | Self::MissingRoot
            | Self::UnterminatedTag
            | Self::MissingTagName
            | Self::UnexpectedClosingTag(_)
            | Self::MissingClosingTag(_)
            | Self::DepthLimitExceeded { .. } => Severity::Error,
        }
    }
}

/// A defect, and where in the source it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the defect is
    pub severity: Severity,

    /// What went wrong
    pub defect: Defect,

    /// Byte offset of the defect in the source
    pub offset: usize,

    /// 1-based line of the defect
    pub line: usize,

    /// 1-based column of the defect
    pub column: usize,
}
impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (at {}:{})",
            self.severity, self.defect, self.line, self.column
        )
    }
}

/// Receives diagnostics from the parser.
pub trait DiagnosticSink {
    /// Called once for every defect found.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`; warnings to `warn!`, errors to `error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;
impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            defect,
            offset,
            line,
            column,
        } = diagnostic;

        match severity {
            Severity::Warning => tracing::warn!(offset, line, column, "{defect}"),
            Severity::Error => tracing::error!(offset, line, column, "{defect}"),
        }
    }
}
