use super::Parser;
use crate::{
    Attributes, Tag, TagContent,
    cursor::trim,
    diagnostic::Defect,
};

impl<'src> Parser<'src, '_> {
    /// Finds and parses the root element, starting the search at `from`.
    pub(super) fn parse_root(&mut self, from: usize) -> Option<Tag> {
        let Some(start) = self.cursor.find_next_tag_start(from) else {
            self.report(from.min(self.cursor.len()), Defect::MissingRoot);
            return None;
        };

        if self.cursor.starts_with(start, "<?") {
            self.report(start, Defect::UnexpectedInstruction);
            return None;
        }

        let (root, end) = self.parse_tag(start, 0, self.cursor.len())?;
        if let Some(next) = self.cursor.find_next_tag_start(end) {
            self.report(next, Defect::TrailingContent);
        }

        Some(root)
    }

    /// Parses the element opened by the `<` at `start`.
    ///
    /// `limit` is where the enclosing element's close tag begins; nothing at or
    /// past it belongs to this element. Returns the element and the offset just
    /// past its end, or `None` if no element could be read at `start`.
    fn parse_tag(&mut self, start: usize, depth: usize, limit: usize) -> Option<(Tag, usize)> {
        let name_start = start + 1;
        if self.cursor.byte_at(name_start) == Some(b'/') {
            let name = self.closing_tag_name(start);
            self.report(start, Defect::UnexpectedClosingTag(name));
            return None;
        }

        //
        // The opening tag must end before the next `<`, and inside the parent
        let bound = self
            .cursor
            .find_byte_before(name_start, limit, b'<')
            .unwrap_or(limit);
        let Some(gt) = self.cursor.find_byte_before(name_start, bound, b'>') else {
            self.report(start, Defect::UnterminatedTag);
            return None;
        };
        let self_closing = gt > name_start && self.cursor.byte_at(gt - 1) == Some(b'/');
        let tag_end = if self_closing { gt - 1 } else { gt };

        //
        // The name runs to the first whitespace, `>` or `/>`
        let name_end = self
            .cursor
            .first_whitespace_before(name_start, tag_end)
            .unwrap_or(tag_end);
        if name_end == name_start {
            self.report(start, Defect::MissingTagName);
            return None;
        }
        let name = self.cursor.slice(name_start..name_end);

        let attributes = self.parse_attributes(name_end, tag_end);
        let content_start = gt + 1;

        if self_closing {
            let tag = self.build_tag(name, attributes, TagContent::Empty);
            return Some((tag, content_start));
        }

        //
        // Without a close tag, the element runs to the end of its parent
        let (content_end, end) = match self.cursor.find_matching_close(content_start, limit, name) {
            Some(close) => (close.start, close.end),
            None => {
                self.report(start, Defect::MissingClosingTag(name.to_string()));
                (limit, limit)
            }
        };

        let content = self.parse_content(name, content_start, content_end, depth);
        Some((self.build_tag(name, attributes, content), end))
    }

    /// Decides between a value and nested elements for the content between
    /// `from` and the element's close tag at `boundary`.
    fn parse_content(&mut self, name: &str, from: usize, boundary: usize, depth: usize) -> TagContent {
        let Some(first) = self
            .cursor
            .find_next_tag_start(from)
            .filter(|lt| *lt < boundary)
        else {
            let value = trim(self.cursor.slice(from..boundary));
            return if value.is_empty() {
                TagContent::Empty
            } else {
                TagContent::Value(value.to_string())
            };
        };

        if depth >= self.config.max_depth {
            self.report(
                first,
                Defect::DepthLimitExceeded {
                    name: name.to_string(),
                    limit: self.config.max_depth,
                },
            );
            return TagContent::Empty;
        }

        let children = self.parse_children(name, from, boundary, depth + 1);
        if children.is_empty() {
            TagContent::Empty
        } else {
            TagContent::Children(children)
        }
    }

    /// Parses sibling elements until no tag starts before `boundary`.
    ///
    /// Text between the siblings cannot be kept alongside them, so it is
    /// dropped with a single warning.
    fn parse_children(&mut self, parent: &str, from: usize, boundary: usize, depth: usize) -> Vec<Tag> {
        let mut children = vec![];
        let mut pos = from;
        let mut reported_text = false;

        while pos < boundary {
            let next = self
                .cursor
                .find_next_tag_start(pos)
                .filter(|lt| *lt < boundary);

            let text_end = next.unwrap_or(boundary);
            if !reported_text && !trim(self.cursor.slice(pos..text_end)).is_empty() {
                reported_text = true;
                let offset = self.cursor.skip_whitespace(pos);
                self.report(offset, Defect::MixedContent(parent.to_string()));
            }

            let Some(start) = next else {
                break;
            };

            pos = match self.parse_tag(start, depth, boundary) {
                Some((tag, end)) => {
                    children.push(tag);
                    end
                }

                // Skip to just past the next `>`, or to the next `<` if that comes first
                None => match self.cursor.find_any(start + 1, &["<", ">"]) {
                    Some((lt, 0)) => lt.min(boundary),
                    Some((gt, _)) => (gt + 1).min(boundary),
                    None => boundary,
                },
            };
        }

        children
    }

    fn build_tag(&mut self, name: &str, attributes: Attributes, content: TagContent) -> Tag {
        self.tags += 1;
        Tag::from_parts(name.to_string(), attributes, content)
    }

    fn closing_tag_name(&self, start: usize) -> String {
        let name_start = start + 2;
        let end = self
            .cursor
            .find_any(name_start, &["<", ">"])
            .map_or(self.cursor.len(), |(offset, _)| offset);
        trim(self.cursor.slice(name_start..end)).to_string()
    }
}
