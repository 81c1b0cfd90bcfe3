//! Flatten name/value attribute lists into key/value maps.
//!
//! Attribute names are mapped to their DOM property spelling (`class` becomes
//! `className`, `autocomplete` becomes `autoComplete`) and string booleans are
//! coerced: `"true"` and `"1"` become `true`, `"false"` becomes `false`.
//! Everything else stays text.

use std::collections::BTreeMap;
use std::fmt;

use crate::schema::{ElementAttribute, ElementOption, WebformElement};

/// A flattened attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
}

impl AttrValue {
    /// Coerce a raw schema string.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" | "1" => Self::Bool(true),
            "false" => Self::Bool(false),
            other => Self::Text(other.to_owned()),
        }
    }

    /// Whether this value is boolean `true`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// JavaScript-style truthiness: `true`, or any non-empty text.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => !s.is_empty(),
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

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Attribute map keyed by DOM property name.
pub type AttributeMap = BTreeMap<String, AttrValue>;

/// An element with flattened attribute maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenormalizedElement {
    pub name: String,
    pub title: String,
    pub kind: String,
    pub attributes: AttributeMap,
    pub label_attributes: AttributeMap,
    pub wrapper_attributes: AttributeMap,
    pub options: Vec<ElementOption>,
    pub additional_properties: AttributeMap,
}

impl DenormalizedElement {
    /// Text value of an additional property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.additional_properties.get(name).and_then(AttrValue::as_text)
    }

    /// Text value of an attribute.
    #[must_use]
    pub fn attribute_text(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_text)
    }

    /// Whether an attribute is boolean `true`.
    #[must_use]
    pub fn attribute_flag(&self, name: &str) -> bool {
        self.attributes.get(name).is_some_and(AttrValue::is_true)
    }
}

/// Map a schema attribute name to its DOM property name.
#[must_use]
pub fn transform_attribute_name(name: &str) -> &str {
    match name {
        "class" => "className",
        "autocomplete" => "autoComplete",
        other => other,
    }
}

fn flatten(list: &[ElementAttribute]) -> AttributeMap {
    list.iter()
        .map(|attr| {
            (
                transform_attribute_name(&attr.name).to_owned(),
                AttrValue::coerce(&attr.value),
            )
        })
        .collect()
}

/// Denormalize `element`, merging `overrides` into its `attributes` map.
///
/// Override values replace schema values, except `className`, which is
/// concatenated as `"{override} {schema}"`.
#[must_use]
pub fn denormalize(element: &WebformElement, overrides: Option<&AttributeMap>) -> DenormalizedElement {
    let mut attributes = flatten(&element.attributes);

    if let Some(overrides) = overrides {
        let mut overrides = overrides.clone();
        let joined = match (overrides.get("className"), attributes.get("className")) {
            (Some(AttrValue::Text(extra)), Some(own)) => Some(format!("{extra} {own}")),
            _ => None,
        };
        if let Some(joined) = joined {
            overrides.insert("className".to_owned(), AttrValue::Text(joined));
        }
        attributes.extend(overrides);
    }

    DenormalizedElement {
        name: element.name.clone(),
        title: element.title.clone(),
        kind: element.kind.clone(),
        attributes,
        label_attributes: flatten(&element.label_attributes),
        wrapper_attributes: flatten(&element.wrapper_attributes),
        options: element.options.clone(),
        additional_properties: flatten(&element.additional_properties),
    }
}
