//! Reference webform schemas shared by the test suites.

use wform_core::{ConditionSet, SchemaError, StateDeclaration, Webform, WebformElement};

/// JSON for a contact form exercising every conditional state.
///
/// - `extra` is invisible while `show_extra` is unchecked.
/// - `blue_note` is visible only when the `color` radio is `blue`.
/// - `email` is required while `contact_me` is checked.
/// - `reason` is disabled while `name` is empty.
pub const CONTACT_FORM_JSON: &str = r#"{
  "drupal_internal__id": "contact",
  "description": "Contact us",
  "status": "open",
  "elements": [
    {"name": "name", "title": "Name", "type": "textfield",
     "attributes": [{"name": "class", "value": "wide"}]},
    {"name": "reason", "title": "Reason", "type": "select",
     "options": [{"label": "Sales", "value": "sales"}, {"label": "Support", "value": "support"}],
     "attributes": [{"name": "placeholder", "value": "Pick one"}],
     "states": [{"state": "disabled", "selector": ":input[name=\"name\"]", "condition": {"empty": true}}]},
    {"name": "show_extra", "title": "Show extra", "type": "checkbox"},
    {"name": "extra", "title": "Extra", "type": "textarea",
     "states": [{"state": "invisible", "selector": ":input[name=\"show_extra\"]", "condition": {"checked": false}}]},
    {"name": "color", "title": "Favourite color", "type": "radios",
     "options": [{"label": "Red", "value": "red"}, {"label": "Green", "value": "green"}, {"label": "Blue", "value": "blue"}]},
    {"name": "blue_note", "title": "Why blue?", "type": "textfield",
     "states": [{"state": "visible", "selector": ":input[name=\"color\"]", "condition": {"value": "blue"}}]},
    {"name": "contact_me", "title": "Contact me", "type": "checkbox"},
    {"name": "email", "title": "Email", "type": "email",
     "attributes": [{"name": "description", "value": "We never share it."}],
     "states": [{"state": "required", "selector": ":input[name=\"contact_me\"]", "condition": {"checked": true}}]},
    {"name": "actions", "title": "", "type": "webform_actions",
     "additional_properties": [{"name": "submit__label", "value": "Send"}]}
  ]
}"#;

/// [`CONTACT_FORM_JSON`], decoded.
pub fn contact_form() -> Result<Webform, SchemaError> {
    Webform::from_json(CONTACT_FORM_JSON)
}

/// Minimal form: a checkbox and a dependent field hidden until it is checked.
#[must_use]
pub fn toggle_form() -> Webform {
    Webform {
        id: "toggle".into(),
        elements: vec![
            WebformElement::new("show_extra", "Show extra", "checkbox"),
            WebformElement::new("extra", "Extra", "textfield").state(show_extra_invisible()),
        ],
        ..Webform::default()
    }
}

/// `invisible` while `show_extra` is not checked.
#[must_use]
pub fn show_extra_invisible() -> StateDeclaration {
    StateDeclaration::new(
        "invisible",
        r#":input[name="show_extra"]"#,
        ConditionSet::new().with("checked", false),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_form_decodes() {
        let form = contact_form().unwrap();
        assert_eq!(form.id, "contact");
        assert_eq!(form.elements.len(), 9);
        assert!(form.has_actions());
        assert_eq!(form.element("extra").unwrap().states, [show_extra_invisible()]);
    }
}
