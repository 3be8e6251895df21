use super::Parser;
use crate::{
    Attribute, Attributes,
    cursor::trim,
    diagnostic::Defect,
};

impl Parser<'_, '_> {
    /// Parses `name="value"` pairs from `from` up to `end`.
    ///
    /// `end` is the offset of the terminator closing the construct: the `>` or
    /// `/>` of an opening tag, or the `?>` of the declaration. Parsing stops
    /// at the first pair without an `=` before `end`. A malformed pair stops
    /// it too, keeping the attributes gathered so far.
    pub(super) fn parse_attributes(&mut self, from: usize, end: usize) -> Attributes {
        let mut attributes = Attributes::new();
        let mut pos = from;

        loop {
            pos = self.cursor.skip_whitespace(pos);

            let Some(equals) = self.cursor.find_byte_before(pos, end, b'=') else {
                break;
            };

            let name = trim(self.cursor.slice(pos..equals));
            if name.is_empty() {
                self.report(equals, Defect::MissingAttributeName);
                break;
            }

            let Some(open) = self.cursor.find_byte_before(equals + 1, end, b'"') else {
                self.report(equals + 1, Defect::UnquotedAttributeValue(name.to_string()));
                break;
            };

            if !trim(self.cursor.slice(equals + 1..open)).is_empty() {
                self.report(equals + 1, Defect::UnquotedAttributeValue(name.to_string()));
                break;
            }

            let Some(close) = self.cursor.find_byte_before(open + 1, end, b'"') else {
                self.report(open, Defect::UnterminatedAttributeValue(name.to_string()));
                break;
            };

            let value = self.cursor.slice(open + 1..close);
            attributes.push(Attribute::new(name, value));
            self.attributes += 1;

            pos = close + 1;
        }

        attributes
    }
}
