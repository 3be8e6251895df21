//! Errors for reading and writing documents
//!
//! Malformed markup is not an error; see [`crate::diagnostic`]. These errors cover
//! the cases where there is no buffer to parse, or nowhere to write one.
use std::path::{Path, PathBuf};

/// A result type for document I/O, which can be either a successful value or an error.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// An error that occurred while reading or writing a document.
#[derive(Debug)]
pub struct XmlError {
    /// The file being read or written, if available
    pub path: Option<PathBuf>,

    /// The kind of error that occurred
    pub kind: XmlErrorKind,
}
impl XmlError {
    /// Creates a new `XmlError`
    #[must_use]
    pub fn new(kind: XmlErrorKind) -> Self {
        Self { path: None, kind }
    }

    /// Adds a path to the error.
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}
impl std::fmt::Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            writeln!(f, "= In {}", path.display())?;
        }

        for line in self.kind.to_string().lines() {
            writeln!(f, "= {line}")?;
        }
        Ok(())
    }
}
impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        Self::new(XmlErrorKind::Io(err))
    }
}
impl From<std::string::FromUtf8Error> for XmlError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::new(XmlErrorKind::Utf8(err))
    }
}

/// The kind of error that occurred while reading or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum XmlErrorKind {
    /// IO error occurred while opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer or more bytes were read than the file reported
    #[error("Error reading file. Expected {expected} bytes and received {read}")]
    LengthMismatch {
        /// The length reported by the file system
        expected: u64,

        /// The number of bytes actually read
        read: u64,
    },

    /// The file is not valid UTF-8
    #[error("File is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
