//! Variable and file attributes
//!
//! Readers hand attributes over as a name -> value map. Only numbers and
//! strings occur in the products this crate handles.

use std::collections::BTreeMap;
use std::fmt;

/// One attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Numeric attribute (all numeric types widened to f64)
    Number(f64),
    /// String attribute
    Text(String),
}

impl AttrValue {
    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(v) => Some(*v),
            AttrValue::Text(_) => None,
        }
    }

    /// String value, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(v) => write!(f, "{}", v),
            AttrValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Ordered attribute map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Attributes(BTreeMap::new())
    }

    /// Insert a numeric attribute
    pub fn with_number(mut self, name: &str, value: f64) -> Self {
        self.0.insert(name.to_string(), AttrValue::Number(value));
        self
    }

    /// Insert a text attribute
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), AttrValue::Text(value.to_string()));
        self
    }

    /// Insert any attribute value
    pub fn insert(&mut self, name: &str, value: AttrValue) {
        self.0.insert(name.to_string(), value);
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Look up a numeric attribute
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(AttrValue::as_f64)
    }

    /// Look up a text attribute
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    /// Iterate attributes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
