/// An attribute set on a tag or on the `<?xml` declaration:
/// `name="value"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}
impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the name of the attribute.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of the attribute, without the quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An ordered list of attributes, in the order they appear in the source.
///
/// Duplicate names are kept; lookups return the last attribute with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<Attribute>);
impl Attributes {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Appends an attribute to the end of the list.
    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// Appends an attribute and returns the list, for building lists inline.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Attribute::new(name, value));
        self
    }

    /// Get the value of an attribute by name.
    ///
    /// Searches the attributes in reverse order, so the last attribute with the same name is returned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|a| a.name == name)
            .map(Attribute::value)
    }

    /// Returns the attributes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Returns the number of attributes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if there are no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Releases every attribute in the list.
    ///
    /// Returns the number of attributes released.
    pub fn free(self) -> usize {
        let count = self.0.len();
        drop(self);
        count
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
