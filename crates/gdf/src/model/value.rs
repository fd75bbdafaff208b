//! Column types and attribute values.
//!
//! Every column of a GDF section declares one of a closed set of types in
//! its header; every cell of that column decodes to the matching
//! [`AttributeValue`] representation.

use std::fmt;

/// Declared column types (header tokens VARCHAR, INT, LONG, FLOAT, DOUBLE, BOOLEAN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Text,
    Integer,
    IntegerWide,
    Float,
    FloatWide,
    Boolean,
}

impl DeclaredType {
    /// Matches a header type token, case-sensitively.
    pub fn from_token(token: &str) -> Option<DeclaredType> {
        match token {
            "VARCHAR" => Some(DeclaredType::Text),
            "INT" => Some(DeclaredType::Integer),
            "LONG" => Some(DeclaredType::IntegerWide),
            "FLOAT" => Some(DeclaredType::Float),
            "DOUBLE" => Some(DeclaredType::FloatWide),
            "BOOLEAN" => Some(DeclaredType::Boolean),
            _ => None,
        }
    }

    /// Returns the header token for this type.
    pub fn token(self) -> &'static str {
        match self {
            DeclaredType::Text => "VARCHAR",
            DeclaredType::Integer => "INT",
            DeclaredType::IntegerWide => "LONG",
            DeclaredType::Float => "FLOAT",
            DeclaredType::FloatWide => "DOUBLE",
            DeclaredType::Boolean => "BOOLEAN",
        }
    }

    /// Returns true for the integer and float types.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DeclaredType::Integer
                | DeclaredType::IntegerWide
                | DeclaredType::Float
                | DeclaredType::FloatWide
        )
    }

    /// Converts the text of one cell into a value of this type.
    ///
    /// Returns `None` when the text is not a valid literal for the type.
    /// Text passes through untouched; numeric and boolean cells are
    /// trimmed first.
    pub fn coerce(self, text: &str) -> Option<AttributeValue> {
        match self {
            DeclaredType::Text => Some(AttributeValue::Text(text.to_string())),
            DeclaredType::Integer | DeclaredType::IntegerWide => {
                text.trim().parse::<i64>().ok().map(AttributeValue::Integer)
            }
            DeclaredType::Float | DeclaredType::FloatWide => {
                text.trim().parse::<f64>().ok().map(AttributeValue::Float)
            }
            DeclaredType::Boolean => parse_bool(text.trim()).map(AttributeValue::Boolean),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

/// Renders a float the way GDF output writes it.
///
/// Uses the shortest representation that parses back to the same value,
/// with `.0` appended to integral values so the cell still reads as a float.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let mut s = value.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// A typed attribute value on a node or edge.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl AttributeValue {
    /// Returns the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => f.write_str(&format_float(*v)),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

/// Named attribute values of one node or edge.
///
/// Keeps insertion order, which is the column order of the section the
/// values came from. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty attribute set with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a value by attribute name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets a value, returning the previous one.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Removes a value by attribute name.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Inserts every value of `other`, overwriting values with the same name.
    pub fn merge(&mut self, other: Attributes) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    /// Keeps only the attributes for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &AttributeValue) -> bool) {
        self.entries.retain(|(n, v)| keep(n, v));
    }

    /// Iterates over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    // =========================================================================
    // Builder-style setters
    // =========================================================================

    /// Adds a text value.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, AttributeValue::Text(value.into()));
        self
    }

    /// Adds an integer value.
    pub fn integer(mut self, name: impl Into<String>, value: i64) -> Self {
        self.insert(name, AttributeValue::Integer(value));
        self
    }

    /// Adds a float value.
    pub fn float(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, AttributeValue::Float(value));
        self
    }

    /// Adds a boolean value.
    pub fn boolean(mut self, name: impl Into<String>, value: bool) -> Self {
        self.insert(name, AttributeValue::Boolean(value));
        self
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttributeValue);
    type IntoIter = std::vec::IntoIter<(String, AttributeValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
