//! Offset-driven parser turning XML text into a [`Document`].
//!
//! There is no tokenizer. The parser jumps between delimiters with the
//! searches in [`crate::cursor`], and decides what a tag is from where its
//! `>`, `/>` and matching `</name>` fall relative to each other:
//! - `<name .../>` is an empty element
//! - `<name ...>text</name>` holds a value
//! - `<name ...><child/></name>` holds children, parsed recursively
//!
//! Malformed markup never aborts the parse. The affected tag or attribute
//! list is truncated and a [`Diagnostic`] is reported.
use crate::{
    Document,
    cursor::Cursor,
    diagnostic::{Defect, Diagnostic, DiagnosticSink},
};

mod attributes;
mod instruction;
mod tag;

/// Default for [`ParserConfig::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// The deepest nesting level elements are parsed at. The root is at depth 0.
    ///
    /// An element whose children would be deeper than this keeps no content,
    /// and a [`Defect::DepthLimitExceeded`] is reported.
    pub max_depth: usize,
}
impl ParserConfig {
    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses one source buffer into a [`Document`].
///
/// Most callers want [`Document::parse_str`] or [`Document::parse_with`].
/// Using the parser directly also exposes how many nodes it built.
///
/// # Example
/// ```rust
/// use xmltag::{Diagnostic, Parser, ParserConfig};
///
/// let mut diagnostics: Vec<Diagnostic> = vec![];
/// let mut parser = Parser::new(
///     r#"<?xml version="1.0"?><root a="1"><b/></root>"#,
///     ParserConfig::default(),
///     &mut diagnostics,
/// );
///
/// let document = parser.parse_document();
/// assert_eq!(parser.allocated(), 4);
/// assert_eq!(document.free(), 4);
/// assert!(diagnostics.is_empty());
/// ```
pub struct Parser<'src, 'sink> {
    cursor: Cursor<'src>,
    config: ParserConfig,
    sink: &'sink mut dyn DiagnosticSink,
    tags: usize,
    attributes: usize,

    /// The last reported offset and its line and column
    last_position: (usize, (usize, usize)),
}
impl<'src, 'sink> Parser<'src, 'sink> {
    /// Creates a parser over `src`, reporting defects to `sink`.
    pub fn new(src: &'src str, config: ParserConfig, sink: &'sink mut dyn DiagnosticSink) -> Self {
        Self {
            cursor: Cursor::new(src),
            config,
            sink,
            tags: 0,
            attributes: 0,
            last_position: (0, (1, 1)),
        }
    }

    /// Parses the `<?xml` declaration and the root element.
    pub fn parse_document(&mut self) -> Document {
        let (instruction, content_start) = self.parse_instruction();
        let root = content_start.and_then(|start| self.parse_root(start));

        tracing::debug!(
            tags = self.tags,
            attributes = self.attributes,
            "Parsed document"
        );
        Document { instruction, root }
    }

    /// Returns the number of tags and attributes built so far.
    ///
    /// Every one of them ends up in the returned document, so this equals
    /// [`Document::node_count`] once parsing is done.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.tags + self.attributes
    }

    fn report(&mut self, offset: usize, defect: Defect) {
        let (line, column) = self.position(offset);
        self.sink.report(Diagnostic {
            severity: defect.severity(),
            defect,
            offset,
            line,
            column,
        });
    }

    /// Line and column of `offset`, counted on from the last reported defect
    /// when it comes later in the source.
    fn position(&mut self, offset: usize) -> (usize, usize) {
        let (from, start) = match self.last_position {
            (from, start) if from <= offset => (from, start),
            _ => (0, (1, 1)),
        };

        let position = self.cursor.position_from(from, start, offset);
        self.last_position = (offset, position);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Severity, Tag};

    fn parse(src: &str) -> (Document, Vec<Diagnostic>) {
        let mut diagnostics: Vec<Diagnostic> = vec![];
        let document = Parser::new(src, ParserConfig::default(), &mut diagnostics).parse_document();
        (document, diagnostics)
    }

    fn defects(diagnostics: &[Diagnostic]) -> Vec<&Defect> {
        diagnostics.iter().map(|d| &d.defect).collect()
    }

    #[test]
    fn test_parse_full_document() {
        let src = r#"<?xml version="1.0" encoding="UTF-8"?>
<library name="city">
    <book id="1">
        <title>Dune</title>
        <author>Frank Herbert</author>
    </book>
    <book id="2"/>
</library>"#;
        let (document, diagnostics) = parse(src);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");

        let instruction = document.instruction.as_ref().unwrap();
        assert_eq!(instruction.get("version"), Some("1.0"));
        assert_eq!(instruction.get("encoding"), Some("UTF-8"));

        let root = document.root.as_ref().unwrap();
        assert_eq!(root.name(), "library");
        assert_eq!(root.get_attribute("name"), Some("city"));

        let books = root.children();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].get_attribute("id"), Some("1"));
        assert_eq!(books[0].children()[0].value(), Some("Dune"));
        assert_eq!(books[0].children()[1].value(), Some("Frank Herbert"));
        assert!(books[1].is_empty_element());
    }

    #[test]
    fn test_allocated_matches_free_count() {
        let src = r#"<?xml version="1.0" encoding="UTF-8"?><r x="1"><a y="2" z="3">v</a><b/></r>"#;
        let mut diagnostics: Vec<Diagnostic> = vec![];
        let mut parser = Parser::new(src, ParserConfig::default(), &mut diagnostics);
        let document = parser.parse_document();

        // 3 tags, 3 tag attributes, 2 instruction attributes
        assert_eq!(parser.allocated(), 8);
        assert_eq!(document.node_count(), 8);
        assert_eq!(document.free(), 8);
    }

    #[test]
    fn test_depth_limit() {
        let src = r#"<?xml version="1.0"?><a><b><c><d/></c></b><e/></a>"#;
        let mut diagnostics: Vec<Diagnostic> = vec![];
        let config = ParserConfig::default().with_max_depth(2);
        let document = Parser::new(src, config, &mut diagnostics).parse_document();

        let root = document.root.unwrap();
        let b = &root.children()[0];
        let c = &b.children()[0];
        assert_eq!(c.name(), "c");
        assert!(c.is_empty_element());

        // Parsing resumes after the truncated subtree
        assert_eq!(root.children()[1].name(), "e");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(
            diagnostics[0].defect,
            Defect::DepthLimitExceeded {
                name: "c".into(),
                limit: 2
            }
        );
    }

    #[test]
    fn test_missing_root() {
        let (document, diagnostics) = parse(r#"<?xml version="1.0"?>   "#);
        assert!(document.instruction.is_some());
        assert!(document.root.is_none());
        assert_eq!(defects(&diagnostics), [&Defect::MissingRoot]);
    }

    #[test]
    fn test_second_instruction_instead_of_root() {
        let (document, diagnostics) = parse(r#"<?xml version="1.0"?><?other?><r/>"#);
        assert!(document.root.is_none());
        assert_eq!(defects(&diagnostics), [&Defect::UnexpectedInstruction]);
    }

    #[test]
    fn test_trailing_content() {
        let (document, diagnostics) = parse(r#"<?xml version="1.0"?><r/><s/>"#);
        assert_eq!(document.root, Some(Tag::new("r")));
        assert_eq!(defects(&diagnostics), [&Defect::TrailingContent]);
        assert_eq!(diagnostics[0].offset, 25);
    }

    #[test]
    fn test_diagnostic_position() {
        let src = "<?xml version=\"1.0\"?>\n<r>\n  <a x=\"1></a>\n</r>";
        let (_, diagnostics) = parse(src);
        assert_eq!(
            defects(&diagnostics),
            [&Defect::UnterminatedAttributeValue("x".into())]
        );
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(diagnostics[0].column, 8);
    }

    #[test]
    fn test_diagnostic_positions_counted_forward() {
        let src = "<?xml version=\"1.0\"?>\n<r>\n  <a x=\"1></a>\n  <b>\n</r>";
        let (_, diagnostics) = parse(src);

        let found: Vec<_> = diagnostics
            .iter()
            .map(|d| (&d.defect, d.line, d.column))
            .collect();
        assert_eq!(
            found,
            [
                (&Defect::UnterminatedAttributeValue("x".into()), 3, 8),
                (&Defect::MissingClosingTag("b".into()), 4, 3),
            ]
        );

        // An earlier offset after a later one is counted from the start
        let mut diagnostics: Vec<Diagnostic> = vec![];
        let mut parser = Parser::new(src, ParserConfig::default(), &mut diagnostics);
        assert_eq!(parser.position(43), (4, 3));
        assert_eq!(parser.position(27), (3, 2));
        assert_eq!(parser.position(43), (4, 3));
    }

    #[test]
    fn test_compact_document() {
        let mut src = String::from(r#"<?xml version="1.0"?><r>"#);
        for _ in 0..50_000 {
            src.push_str("<item>value</item><x/>");
        }
        src.push_str("<last/></r>");

        let (document, diagnostics) = parse(&src);
        assert!(diagnostics.is_empty());

        let root = document.root.unwrap();
        assert_eq!(root.children().len(), 100_001);
        assert_eq!(root.children()[0].value(), Some("value"));
        assert_eq!(root.children()[100_000].name(), "last");
    }

    #[test]
    fn test_many_unterminated_tags() {
        let mut src = String::from(r#"<?xml version="1.0"?><r>"#);
        src.push_str(&"<a".repeat(20_000));
        src.push_str("</r>");

        let (document, diagnostics) = parse(&src);
        assert!(document.root.unwrap().is_empty_element());
        assert_eq!(diagnostics.len(), 20_000);
        assert!(diagnostics.iter().all(|d| d.defect == Defect::UnterminatedTag));

        let last = &diagnostics[19_999];
        assert_eq!(last.offset, 24 + 2 * 19_999);
        assert_eq!((last.line, last.column), (1, last.offset + 1));
    }
}
