//! Aggregated state outcome for one dependent element.
//!
//! A [`StateMapping`] is a snapshot: the engine never mutates a published
//! mapping, it derives a new one with [`StateMapping::with`].
//!
//! Hidden-ness is derived from two keys: a dependent is hidden iff
//! `invisible == true` or `visible == false`. Absence of both keys means
//! visible.

use std::collections::BTreeMap;
use std::fmt;

/// `invisible` state key.
pub const INVISIBLE: &str = "invisible";
/// `visible` state key.
pub const VISIBLE: &str = "visible";
/// `required` state key.
pub const REQUIRED: &str = "required";
/// `disabled` state key.
pub const DISABLED: &str = "disabled";
/// `checked` state key.
pub const CHECKED: &str = "checked";

/// Mapping from state name to boolean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMapping {
    states: BTreeMap<String, bool>,
}

impl StateMapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `state`, if present.
    #[must_use]
    pub fn get(&self, state: &str) -> Option<bool> {
        self.states.get(state).copied()
    }

    /// Whether `state` is present and `true`.
    #[must_use]
    pub fn is_set(&self, state: &str) -> bool {
        self.get(state) == Some(true)
    }

    /// Set a key while building a mapping. Later writes win.
    pub fn insert(&mut self, state: impl Into<String>, value: bool) {
        self.states.insert(state.into(), value);
    }

    /// Derive a new snapshot with exactly one key changed.
    #[must_use]
    pub fn with(&self, state: &str, value: bool) -> Self {
        let mut next = self.clone();
        next.insert(state, value);
        next
    }

    /// Whether the dependent element must not be rendered.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.get(INVISIBLE) == Some(true) || self.get(VISIBLE) == Some(false)
    }

    /// Iterate `(state, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.states.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the mapping holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for StateMapping {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl fmt::Display for StateMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}
