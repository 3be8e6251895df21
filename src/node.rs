//! The element tree built by the parser.
mod attribute;
pub use attribute::*;

/// What an element holds between its opening and closing tags.
///
/// An element holds text or nested elements, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagContent {
    /// `<name/>`, or `<name></name>` with nothing but whitespace inside
    #[default]
    Empty,

    /// `<name>text</name>`, with the text trimmed
    Value(String),

    /// `<name><child/>...</name>`, in document order
    Children(Vec<Tag>),
}

/// An element in the document tree, with a name, attributes, and content:
/// `<name attr="value">...</name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Attributes,
    content: TagContent,
}
impl Tag {
    /// Create a new empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            content: TagContent::Empty,
        }
    }

    pub(crate) fn from_parts(name: String, attributes: Attributes, content: TagContent) -> Self {
        Self {
            name,
            attributes,
            content,
        }
    }

    /// Appends an attribute to the element.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Sets the text content of the element, replacing any children.
    ///
    /// An empty string leaves the element empty.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.content = if value.is_empty() {
            TagContent::Empty
        } else {
            TagContent::Value(value)
        };
        self
    }

    /// Appends a child element, replacing any text content.
    #[must_use]
    pub fn with_child(mut self, child: Tag) -> Self {
        match &mut self.content {
            TagContent::Children(children) => children.push(child),
            _ => self.content = TagContent::Children(vec![child]),
        }
        self
    }

    /// Get the name of the element.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the attributes of the element.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get an attribute value by name.
    ///
    /// See [`Attributes::get`].
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Get the content of the element.
    #[must_use]
    pub fn content(&self) -> &TagContent {
        &self.content
    }

    /// Get the text content of the element, if it has any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.content {
            TagContent::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Get the child elements, in document order. Empty if the element has none.
    #[must_use]
    pub fn children(&self) -> &[Tag] {
        match &self.content {
            TagContent::Children(children) => children,
            _ => &[],
        }
    }

    /// Get the first child element.
    ///
    /// The remaining children follow it in [`Tag::children`].
    #[must_use]
    pub fn first_child(&self) -> Option<&Tag> {
        self.children().first()
    }

    /// Returns true if the element has neither text nor children: `<name/>`
    #[must_use]
    pub fn is_empty_element(&self) -> bool {
        matches!(self.content, TagContent::Empty)
    }

    /// Returns the number of elements and attributes in this subtree, this element included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.attributes.len() + self.children().iter().map(Tag::node_count).sum::<usize>()
    }

    /// Releases this element, its attributes, and every element below it.
    ///
    /// Returns the number of elements and attributes released, which matches
    /// [`Tag::node_count`] taken before the call.
    pub fn free(self) -> usize {
        let Self {
            name,
            attributes,
            content,
        } = self;

        let mut count = attributes.free();
        if let TagContent::Children(children) = content {
            count += children.into_iter().map(Tag::free).sum::<usize>();
        }

        drop(name);
        count + 1
    }
}
