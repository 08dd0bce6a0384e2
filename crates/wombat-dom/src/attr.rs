//! Element attribute storage.
//!
//! Attributes keep their markup order and distinguish bare (valueless)
//! attributes from attributes with an explicit value, so that
//! `<input disabled>` and `<input disabled="">` survive a parse/serialize
//! round trip in their original spelling.

/// The value side of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// The attribute was written without `=`, like `disabled`.
    Bare,
    /// The attribute has explicit text, which may be empty.
    Value(String),
}

impl AttrValue {
    /// The explicit text, or `None` for a bare attribute.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bare => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Returns `true` for a bare (valueless) attribute.
    #[must_use]
    pub const fn is_bare(&self) -> bool {
        matches!(self, Self::Bare)
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

/// An insertion-ordered attribute map. Lookup is by exact name; callers that
/// want case folding apply it before calling in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.items.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns `true` if the attribute is present, bare or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|(n, _)| n == name)
    }

    /// Sets an attribute, replacing any existing value in place so the
    /// attribute keeps its original position.
    pub fn set(&mut self, name: &str, value: AttrValue) {
        match self.items.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.items.push((name.to_owned(), value)),
        }
    }

    /// Inserts only when the name is not already present. Returns `true` if
    /// the value was inserted. This is the parser's duplicate-attribute
    /// rule: the first occurrence wins.
    pub fn insert_if_absent(&mut self, name: &str, value: AttrValue) -> bool {
        if self.contains(name) {
            return false;
        }
        self.items.push((name.to_owned(), value));
        true
    }

    /// Removes an attribute, returning its former value.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let idx = self.items.iter().position(|(n, _)| n == name)?;
        Some(self.items.remove(idx).1)
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.items.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(n, _)| n.as_str())
    }
}

// ========== tests ==========
