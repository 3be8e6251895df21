use crate::{
    Attributes, Tag,
    diagnostic::{DiagnosticSink, TracingSink},
    error::{XmlError, XmlErrorKind, XmlResult},
    parser::{Parser, ParserConfig},
};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

/// An XML document that has been parsed into a tree.
///
/// The root of the tree contains:
/// - The attributes of the `<?xml ...?>` declaration, if present
/// - The root element, which is a tree of [`Tag`]s
///
/// The parser accepts a small subset of XML: one declaration, one root
/// element, and elements holding either text or other elements. There is no
/// entity expansion, and no support for comments, CDATA or doctypes.
///
/// Malformed input does not fail the parse. Whatever could not be understood
/// is left out of the tree, and reported as a [`crate::Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// The attributes of the <?xml declaration, in source order.
    pub instruction: Option<Attributes>,

    /// The root element.
    pub root: Option<Tag>,
}
impl Document {
    /// Creates a document with no declaration and no root element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from the given source string.
    ///
    /// Defects in the source are logged through `tracing`.
    ///
    /// # Example
    /// ```rust
    /// use xmltag::Document;
    /// let src = r#"<?xml version="1.0"?><test><test2>test</test2></test>"#;
    ///
    /// let doc = Document::parse_str(src);
    /// let root = doc.root.unwrap();
    /// assert_eq!(root.name(), "test");
    /// assert_eq!(root.children()[0].value(), Some("test"));
    /// ```
    #[must_use]
    pub fn parse_str(source: &str) -> Self {
        Self::parse_with(source, &ParserConfig::default(), &mut TracingSink)
    }

    /// Parses a document from the given source string, reporting defects to `sink`.
    ///
    /// # Example
    /// ```rust
    /// use xmltag::{Defect, Diagnostic, Document, ParserConfig};
    ///
    /// let mut diagnostics: Vec<Diagnostic> = vec![];
    /// let doc = Document::parse_with("<test/>", &ParserConfig::default(), &mut diagnostics);
    ///
    /// assert!(doc.instruction.is_none());
    /// assert_eq!(diagnostics[0].defect, Defect::MissingInstruction);
    /// ```
    pub fn parse_with(
        source: &str,
        config: &ParserConfig,
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        Parser::new(source, *config, sink).parse_document()
    }

    /// Reads and parses a file.
    ///
    /// Defects in the source are logged through `tracing`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read in full, or is not UTF-8.
    pub fn from_file(path: impl AsRef<Path>) -> XmlResult<Self> {
        Self::from_file_with(path, &ParserConfig::default(), &mut TracingSink)
    }

    /// Reads and parses a file, reporting defects to `sink`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read in full, or is not UTF-8.
    pub fn from_file_with(
        path: impl AsRef<Path>,
        config: &ParserConfig,
        sink: &mut dyn DiagnosticSink,
    ) -> XmlResult<Self> {
        let path = path.as_ref();
        let source = read_source(path).map_err(|e| e.with_path(path))?;
        Ok(Self::parse_with(&source, config, sink))
    }

    /// Create a formatted XML string from this document.
    ///
    /// `tab_char` is used to indent the XML. If `None`, a tab is used.
    ///
    /// # Errors
    /// Can fail if the formatted output is not valid UTF-8, which only happens for
    /// documents built by hand with invalid strings.
    ///
    /// # Example
    /// ```rust
    /// use xmltag::Document;
    /// const SRC: &str = r#"<?xml version="1.0"?><test><test2>test</test2></test>"#;
    ///
    /// let doc = Document::parse_str(SRC);
    /// let formatted = doc.to_xml(Some("    ")).unwrap();
    /// assert_eq!(
    ///     formatted,
    ///     "<?xml version=\"1.0\"?>\n<test>\n    <test2>test</test2>\n</test>\n"
    /// );
    /// ```
    pub fn to_xml(&self, tab_char: Option<&str>) -> std::io::Result<String> {
        let mut buffer = vec![];
        self.to_xml_with_writer(&mut buffer, tab_char)?;

        let buffer = String::from_utf8(buffer).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to convert to UTF-8: {e}"),
            )
        })?;
        Ok(buffer)
    }

    /// Write this document as a formatted XML string using the given writer.
    ///
    /// See [`Document::to_xml`] for more details.
    ///
    /// # Errors
    /// Fails if the writer fails.
    pub fn to_xml_with_writer<W: Write>(
        &self,
        writer: &mut W,
        tab_char: Option<&str>,
    ) -> std::io::Result<()> {
        crate::to_xml::write_xml(writer, self, tab_char)
    }

    /// Writes this document to a file, indented with tabs.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> XmlResult<()> {
        let path = path.as_ref();
        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            self.to_xml_with_writer(&mut writer, None)?;
            writer.flush()
        };

        write().map_err(|e| XmlError::from(e).with_path(path))
    }

    /// Returns the number of elements and attributes in the document,
    /// declaration attributes included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.instruction.as_ref().map_or(0, Attributes::len)
            + self.root.as_ref().map_or(0, Tag::node_count)
    }

    /// Releases the declaration and the element tree.
    ///
    /// Returns the number of elements and attributes released.
    pub fn free(self) -> usize {
        let Self { instruction, root } = self;
        instruction.map_or(0, Attributes::free) + root.map_or(0, Tag::free)
    }
}

/// Reads the whole file, checking that every byte the file reports was read.
fn read_source(path: &Path) -> XmlResult<String> {
    let mut file = File::open(path)?;
    let expected = file.metadata()?.len();

    let mut buffer = Vec::with_capacity(usize::try_from(expected).unwrap_or_default());
    let read = file.read_to_end(&mut buffer)? as u64;
    if read != expected {
        return Err(XmlError::new(XmlErrorKind::LengthMismatch { expected, read }));
    }

    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Defect, Diagnostic};

    const SRC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<test a="1">
    <test2>test</test2>
    <test3/>
</test>"#;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("xmltag-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_new_document() {
        let document = Document::new();
        assert!(document.instruction.is_none());
        assert!(document.root.is_none());
        assert_eq!(document.free(), 0);
    }

    #[test]
    fn test_parse_str() {
        let doc = Document::parse_str(SRC);
        let root = doc.root.as_ref().unwrap();
        assert_eq!(root.name(), "test");
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_node_count_and_free() {
        let doc = Document::parse_str(SRC);
        // 2 declaration attributes, 3 tags, 1 tag attribute
        assert_eq!(doc.node_count(), 6);
        assert_eq!(doc.free(), 6);
    }

    #[test]
    fn test_to_xml() {
        let doc = Document::parse_str(SRC);
        let formatted = doc.to_xml(None).unwrap();
        assert_eq!(
            formatted,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<test a=\"1\">\n\t<test2>test</test2>\n\t<test3/>\n</test>\n"
        );
    }

    #[test]
    fn test_reparse_is_stable() {
        let doc = Document::parse_str(SRC);
        let formatted = doc.to_xml(None).unwrap();
        assert_eq!(Document::parse_str(&formatted), doc);
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("round-trip.xml");
        let doc = Document::parse_str(SRC);

        doc.to_file(&path).unwrap();
        let read = Document::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read, doc);
    }

    #[test]
    fn test_from_file_with_reports_defects() {
        let path = temp_path("defects.xml");
        std::fs::write(&path, "<r><a x=\"1></a></r>").unwrap();

        let mut diagnostics: Vec<Diagnostic> = vec![];
        let doc = Document::from_file_with(&path, &ParserConfig::default(), &mut diagnostics)
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(doc.root.is_some());
        let defects: Vec<_> = diagnostics.into_iter().map(|d| d.defect).collect();
        assert_eq!(
            defects,
            [
                Defect::MissingInstruction,
                Defect::UnterminatedAttributeValue("x".into())
            ]
        );
    }

    #[test]
    fn test_from_missing_file() {
        let path = temp_path("does-not-exist.xml");
        let err = Document::from_file(&path).unwrap_err();
        assert!(matches!(err.kind, XmlErrorKind::Io(_)));
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_from_file_not_utf8() {
        let path = temp_path("binary.xml");
        std::fs::write(&path, [0x3C, 0xFF, 0xFE, 0x3E]).unwrap();

        let err = Document::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err.kind, XmlErrorKind::Utf8(_)));
    }
}
