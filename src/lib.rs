//! Offset-driven XML parser and writer.
//!
//! Parses a small, well-formed subset of XML into an owned tree, and writes
//! the tree back out as indented XML:
//! - One `<?xml ...?>` declaration, whose attributes are kept in order
//! - One root element, with elements nested to any depth
//! - Attributes with double-quoted values
//! - Elements holding either text or other elements, never both
//!
//! There is no tokenizer; the parser finds tags by searching for delimiters
//! in the source buffer and matching each `<name>` to its `</name>`.
//! Malformed markup is not an error. It is dropped from the tree, and a
//! [`Diagnostic`] is reported to a [`DiagnosticSink`].
//!
//! # Example
//! ```rust
//! use xmltag::Document;
//!
//! let document = Document::parse_str(r#"<?xml version="1.0"?>
//! <bookstore name="corner">
//!     <book>Dune</book>
//!     <book>Emma</book>
//! </bookstore>"#);
//!
//! let root = document.root.as_ref().unwrap();
//! assert_eq!(root.get_attribute("name"), Some("corner"));
//! assert_eq!(root.children()[1].value(), Some("Emma"));
//!
//! let xml = document.to_xml(None).unwrap();
//! assert_eq!(Document::parse_str(&xml), document);
//! ```
#![warn(missing_docs)]

pub mod cursor;

pub mod diagnostic;
pub use diagnostic::{Defect, Diagnostic, DiagnosticSink, Severity, TracingSink};

mod document;
pub use document::Document;

pub mod error;
pub use error::{XmlError, XmlErrorKind, XmlResult};

mod node;
pub use node::*;

mod parser;
pub use parser::{DEFAULT_MAX_DEPTH, Parser, ParserConfig};

pub mod to_xml;
