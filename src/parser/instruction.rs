use super::Parser;
use crate::{Attributes, cursor::is_space, diagnostic::Defect};

const OPEN: &str = "<?";
const KEYWORD: &str = "<?xml";
const CLOSE: &str = "?>";

impl Parser<'_, '_> {
    /// Parses the leading `<?xml ...?>` declaration.
    ///
    /// Returns its attributes, if it has any, and the offset the search for the
    /// root element starts from. There is nothing left to search when the
    /// declaration is never terminated.
    pub(super) fn parse_instruction(&mut self) -> (Option<Attributes>, Option<usize>) {
        let start = self.cursor.skip_whitespace(0);
        if !self.cursor.starts_with(start, OPEN) {
            self.report(start, Defect::MissingInstruction);
            return (None, Some(start));
        }

        let Some(end) = self.cursor.find(start + OPEN.len(), CLOSE) else {
            self.report(start, Defect::UnterminatedInstruction);
            return (None, None);
        };
        let content_start = end + CLOSE.len();

        //
        // `<?xml` must be the whole target; `<?xml-stylesheet` is something else
        let keyword_end = start + KEYWORD.len();
        let is_xml = self.cursor.starts_with(start, KEYWORD)
            && keyword_end <= end
            && self
                .cursor
                .byte_at(keyword_end)
                .is_some_and(|b| is_space(b) || b == b'?');
        if !is_xml {
            self.report(start, Defect::MissingInstruction);
            return (None, Some(content_start));
        }

        let attributes = self.parse_attributes(keyword_end, end);
        if attributes.is_empty() {
            self.report(start, Defect::EmptyInstruction);
            return (None, Some(content_start));
        }

        (Some(attributes), Some(content_start))
    }
}
