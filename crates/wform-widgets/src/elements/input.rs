//! Text-like controls.

use wform_core::element_id;

use crate::markup::{Markup, Tag};
use crate::wrapper::ElementWrapper;
use crate::{RenderContext, overrides};

/// Attributes that describe the element rather than the control.
pub(crate) const NON_CONTROL_ATTRS: &[&str] = &["description"];

/// `<input type=input_type>`, wrapped unless the type is `hidden`.
pub fn render_input(ctx: &RenderContext<'_>, input_type: &str, out: &mut Markup) {
    let name = ctx.element.name.as_str();
    let id = element_id(name);
    let el = ctx.denormalize(&overrides([
        ("className", "form-control"),
        ("name", name),
        ("type", input_type),
        ("id", id.as_str()),
    ]));
    let default = ctx.element.raw_property("default_value");
    let control = |out: &mut Markup| {
        Tag::new("input")
            .attrs(&el.attributes, NON_CONTROL_ATTRS)
            .attr_opt("value", default)
            .void(out);
    };

    if input_type == "hidden" {
        control(out);
        return;
    }
    ElementWrapper::new(&el, ctx.states)
        .error(ctx.error)
        .label_for(&id)
        .render(out, control);
}

/// `<textarea>` with the default value as content.
pub fn render_textarea(ctx: &RenderContext<'_>, out: &mut Markup) {
    let name = ctx.element.name.as_str();
    let id = element_id(name);
    let el = ctx.denormalize(&overrides([
        ("className", "form-control"),
        ("name", name),
        ("id", id.as_str()),
    ]));
    let default = ctx.element.raw_property("default_value").unwrap_or("");

    ElementWrapper::new(&el, ctx.states)
        .error(ctx.error)
        .label_for(&id)
        .render(out, |out| {
            Tag::new("textarea")
                .attrs(&el.attributes, NON_CONTROL_ATTRS)
                .text(out, default);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wform_core::{StateMapping, WebformElement};

    fn html(element: &WebformElement, states: &StateMapping) -> String {
        let mut out = Markup::new();
        crate::render_element(&RenderContext::new(element, states), &mut out);
        out.into_string()
    }

    #[test]
    fn textfield_renders_text_input() {
        let element = WebformElement::new("first_name", "First name", "textfield")
            .attribute("class", "wide")
            .attribute("required", "true");
        assert_eq!(
            html(&element, &StateMapping::new()),
            concat!(
                r#"<div class="form-group required">"#,
                r#"<label for="form-first-name">First name</label>"#,
                r#"<input class="form-control wide" id="form-first-name" name="first_name" required type="text">"#,
                "</div>"
            )
        );
    }

    #[test]
    fn hidden_input_has_no_wrapper() {
        let element = WebformElement::new("token", "Token", "hidden").property("default_value", "abc");
        assert_eq!(
            html(&element, &StateMapping::new()),
            r#"<input class="form-control" id="form-token" name="token" type="hidden" value="abc">"#
        );
    }

    #[test]
    fn hidden_input_ignores_hidden_state() {
        let element = WebformElement::new("token", "Token", "hidden");
        let invisible: StateMapping = [("invisible", true)].into_iter().collect();
        assert!(html(&element, &invisible).starts_with("<input"));
    }

    #[test]
    fn email_uses_own_type_and_state_overrides() {
        let element = WebformElement::new("email", "Email", "email");
        let states: StateMapping = [("required", true)].into_iter().collect();
        let out = html(&element, &states);
        assert!(out.contains(r#"type="email""#));
        assert!(out.contains(" required "));
        assert!(out.starts_with(r#"<div class="form-group required">"#));
    }

    #[test]
    fn textarea_content_is_escaped() {
        let element = WebformElement::new("notes", "Notes", "textarea").property("default_value", "a<b");
        let out = html(&element, &StateMapping::new());
        assert!(out.contains(r#"<textarea class="form-control" id="form-notes" name="notes">a&lt;b</textarea>"#));
    }

    #[test]
    fn invisible_textfield_renders_nothing() {
        let element = WebformElement::new("x", "X", "textfield");
        let invisible: StateMapping = [("invisible", true)].into_iter().collect();
        assert_eq!(html(&element, &invisible), "");
    }
}
