//! Webform schema as delivered by the CMS.
//!
//! Attributes arrive as name/value lists (`[{"name": "required", "value":
//! "true"}]`); see [`crate::denormalize`] for the flattened form used by the
//! renderers.

use serde::{Deserialize, Serialize};

use crate::declaration::StateDeclaration;
use crate::error::SchemaError;

/// A whole form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Webform {
    /// Machine name of the webform on the server.
    #[serde(rename = "drupal_internal__id")]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub elements: Vec<WebformElement>,
}

impl Webform {
    /// Decode a webform from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let webform: Self = serde_json::from_str(json)?;
        tracing::debug!(
            webform = %webform.id,
            elements = webform.elements.len(),
            "decoded webform schema"
        );
        Ok(webform)
    }

    /// Look up an element by name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&WebformElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Whether the schema defines its own submit element.
    #[must_use]
    pub fn has_actions(&self) -> bool {
        self.elements.iter().any(|e| e.kind == "webform_actions")
    }
}

/// A single form element (text field, checkbox group, submit button, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebformElement {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<ElementAttribute>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label_attributes: Vec<ElementAttribute>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wrapper_attributes: Vec<ElementAttribute>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<ElementOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub states: Vec<StateDeclaration>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_properties: Vec<ElementAttribute>,
}

impl WebformElement {
    /// Create an element with a name, title, and type.
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Raw, uncoerced value of an additional property.
    #[must_use]
    pub fn raw_property(&self, name: &str) -> Option<&str> {
        self.additional_properties
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Builder-style: append an attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(ElementAttribute::new(name, value));
        self
    }

    /// Builder-style: append an additional property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_properties
            .push(ElementAttribute::new(name, value));
        self
    }

    /// Builder-style: append an option.
    #[must_use]
    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(ElementOption {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Builder-style: append a state declaration.
    #[must_use]
    pub fn state(mut self, declaration: StateDeclaration) -> Self {
        self.states.push(declaration);
        self
    }
}

/// A name/value attribute pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAttribute {
    pub name: String,
    pub value: String,
}

impl ElementAttribute {
    /// Create an attribute pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A selectable option of a select, radios, or checkboxes element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOption {
    pub label: String,
    pub value: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT: &str = r#"{
        "drupal_internal__id": "contact",
        "elements": [
            {
                "name": "name",
                "title": "Your Name",
                "type": "textfield",
                "attributes": [{"name": "required", "value": "true"}]
            },
            {
                "name": "extra",
                "title": "Extra",
                "type": "textarea",
                "states": [
                    {"state": "invisible", "selector": ":input[name=\"show_extra\"]", "condition": {"checked": false}}
                ],
                "options": null
            },
            {
                "name": "actions",
                "title": "Submit button(s)",
                "type": "webform_actions",
                "additional_properties": [{"name": "submit__label", "value": "Send message"}]
            }
        ]
    }"#;

    #[test]
    fn decode_contact_form() {
        let form = Webform::from_json(CONTACT).unwrap();
        assert_eq!(form.id, "contact");
        assert_eq!(form.elements.len(), 3);
        assert_eq!(form.elements[0].kind, "textfield");
        assert_eq!(form.elements[1].states.len(), 1);
        assert!(form.elements[1].options.is_empty());
        assert!(form.has_actions());
        assert_eq!(form.element("extra").unwrap().title, "Extra");
    }

    #[test]
    fn decode_rejects_missing_type() {
        let err = Webform::from_json(r#"{"drupal_internal__id": "x", "elements": [{"name": "a"}]}"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid webform schema"));
    }

    #[test]
    fn builder_helpers() {
        let el = WebformElement::new("color", "Color", "radios")
            .option("Blue", "blue")
            .attribute("required", "true")
            .property("title_display", "after");
        assert_eq!(el.options.len(), 1);
        assert_eq!(el.attributes[0].name, "required");
        assert_eq!(el.additional_properties[0].value, "after");
    }
}
