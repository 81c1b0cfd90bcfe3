//! Condition vocabulary for state declarations.
//!
//! A [`ConditionSet`] is an ordered list of `(condition, operand)` pairs as it
//! appears in the schema, e.g. `{"checked": true, "value": null}`. A `null`
//! operand means the condition is not asserted for this declaration.
//!
//! # Invariants
//!
//! 1. Entry order is the order of the keys in the source object.
//! 2. Unknown condition names are kept as [`Condition::Other`]; decoding never
//!    fails because of an unrecognized key.
//! 3. Numeric operands are kept as text so that `{"value": 3}` compares against
//!    the element value `"3"`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A recognized (or unrecognized) condition name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    Disabled,
    Empty,
    Enabled,
    Filled,
    Required,
    Checked,
    Unchecked,
    Collapsed,
    Expanded,
    Visible,
    Invisible,
    Value,
    /// A name outside the fixed vocabulary.
    Other(String),
}

impl Condition {
    /// Parse a condition name. Never fails; unknown names become [`Condition::Other`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "disabled" => Self::Disabled,
            "empty" => Self::Empty,
            "enabled" => Self::Enabled,
            "filled" => Self::Filled,
            "required" => Self::Required,
            "checked" => Self::Checked,
            "unchecked" => Self::Unchecked,
            "collapsed" => Self::Collapsed,
            "expanded" => Self::Expanded,
            "visible" => Self::Visible,
            "invisible" => Self::Invisible,
            "value" => Self::Value,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The schema spelling of this condition.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Disabled => "disabled",
            Self::Empty => "empty",
            Self::Enabled => "enabled",
            Self::Filled => "filled",
            Self::Required => "required",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
            Self::Visible => "visible",
            Self::Invisible => "invisible",
            Self::Value => "value",
            Self::Other(name) => name,
        }
    }

    /// Whether the name belongs to the fixed vocabulary.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand of an asserted condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    Bool(bool),
    Text(String),
}

impl ConditionValue {
    /// The boolean this operand asserts.
    ///
    /// `Bool(b)` asserts `b`. Any text operand asserts `true`: the condition
    /// is present, its payload is only meaningful for [`Condition::Value`].
    #[must_use]
    pub fn asserted(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(_) => true,
        }
    }

    /// Text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered set of conditions; all non-null entries must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    entries: Vec<(Condition, Option<ConditionValue>)>,
}

impl ConditionSet {
    /// Create an empty condition set (vacuously satisfied).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: append an asserted condition.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<ConditionValue>) -> Self {
        self.push(Condition::parse(name), Some(value.into()));
        self
    }

    /// Builder-style: append a condition whose operand is `null`.
    #[must_use]
    pub fn with_null(mut self, name: &str) -> Self {
        self.push(Condition::parse(name), None);
        self
    }

    /// Append an entry.
    pub fn push(&mut self, condition: Condition, value: Option<ConditionValue>) {
        self.entries.push((condition, value));
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Condition, Option<&ConditionValue>)> {
        self.entries.iter().map(|(c, v)| (c, v.as_ref()))
    }

    /// Iterate only entries with a non-null operand.
    pub fn asserted(&self) -> impl Iterator<Item = (&Condition, &ConditionValue)> {
        self.entries
            .iter()
            .filter_map(|(c, v)| v.as_ref().map(|v| (c, v)))
    }

    /// Number of entries, including null ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Condition, Option<ConditionValue>)> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = (Condition, Option<ConditionValue>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn operand_from_json(value: serde_json::Value) -> Option<ConditionValue> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(ConditionValue::Bool(b)),
        serde_json::Value::String(s) => Some(ConditionValue::Text(s)),
        serde_json::Value::Number(n) => Some(ConditionValue::Text(n.to_string())),
        // Arrays and objects are outside the vocabulary; keep them as an
        // operand that can never match a value comparison.
        other => Some(ConditionValue::Text(other.to_string())),
    }
}

struct ConditionSetVisitor;

impl<'de> Visitor<'de> for ConditionSetVisitor {
    type Value = ConditionSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of condition names to boolean, string, or null")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut set = ConditionSet::new();
        while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
            set.push(Condition::parse(&name), operand_from_json(value));
        }
        Ok(set)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(ConditionSet::new())
    }
}

impl<'de> Deserialize<'de> for ConditionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConditionSetVisitor)
    }
}

impl Serialize for ConditionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (condition, value) in &self.entries {
            match value {
                None => map.serialize_entry(condition.as_str(), &serde_json::Value::Null)?,
                Some(ConditionValue::Bool(b)) => map.serialize_entry(condition.as_str(), b)?,
                Some(ConditionValue::Text(s)) => map.serialize_entry(condition.as_str(), s)?,
            }
        }
        map.end()
    }
}
