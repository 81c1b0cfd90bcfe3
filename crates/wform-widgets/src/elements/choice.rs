//! Checkable controls and selects.

use wform_core::mapping::CHECKED;
use wform_core::{AttrValue, element_id, option_id};

use crate::elements::input::NON_CONTROL_ATTRS;
use crate::markup::{Markup, Tag};
use crate::wrapper::ElementWrapper;
use crate::{RenderContext, overrides};

/// Placeholder text of a select without its own.
pub const DEFAULT_SELECT_LABEL: &str = "-- Select --";

/// A single checkbox or radio. Its value is always `1` and its label follows it.
///
/// The `checked` engine state, when present, overrides the default value.
pub fn render_checkbox(ctx: &RenderContext<'_>, out: &mut Markup) {
    let name = ctx.element.name.as_str();
    let id = element_id(name);
    let mut el = ctx.denormalize(&overrides([
        ("className", "form-check-input"),
        ("name", name),
        ("type", ctx.element.kind.as_str()),
        ("value", "1"),
        ("id", id.as_str()),
    ]));
    el.additional_properties
        .insert("title_display".to_owned(), AttrValue::from("after"));

    let checked = ctx.states.get(CHECKED).unwrap_or_else(|| {
        ctx.element
            .raw_property("default_value")
            .is_some_and(|d| AttrValue::coerce(d).is_truthy())
    });

    ElementWrapper::new(&el, ctx.states)
        .error(ctx.error)
        .class("form-check")
        .label_class("form-check-label")
        .label_for(&id)
        .render(out, |out| {
            Tag::new("input")
                .flag("checked", checked)
                .attrs(&el.attributes, NON_CONTROL_ATTRS)
                .void(out);
        });
}

/// One `form-check` block per option, sharing the element's name.
pub fn render_group(ctx: &RenderContext<'_>, input_type: &str, out: &mut Markup) {
    let name = ctx.element.name.as_str();
    let el = ctx.denormalize(&overrides([
        ("className", "form-check-input"),
        ("name", name),
        ("type", input_type),
    ]));
    let default = ctx.element.raw_property("default_value");

    ElementWrapper::new(&el, ctx.states)
        .error(ctx.error)
        .render(out, |out| {
            for option in &el.options {
                let id = option_id(name, &option.value);
                Tag::new("div").attr("class", "form-check").open(out);
                Tag::new("input")
                    .attr("id", id.as_str())
                    .attr("value", option.value.as_str())
                    .flag("checked", default == Some(option.value.as_str()))
                    .attrs(&el.attributes, NON_CONTROL_ATTRS)
                    .void(out);
                Tag::new("label")
                    .attr("class", "form-check-label")
                    .attr("for", id)
                    .text(out, &option.label);
                out.close("div");
            }
        });
}

/// `<select>` led by a disabled placeholder option.
pub fn render_select(ctx: &RenderContext<'_>, out: &mut Markup) {
    let name = ctx.element.name.as_str();
    let id = element_id(name);
    let el = ctx.denormalize(&overrides([
        ("className", "form-control"),
        ("name", name),
        ("id", id.as_str()),
    ]));
    let default = ctx.element.raw_property("default_value").unwrap_or("");
    let placeholder = el.attribute_text("placeholder").unwrap_or(DEFAULT_SELECT_LABEL);

    ElementWrapper::new(&el, ctx.states)
        .error(ctx.error)
        .label_for(&id)
        .render(out, |out| {
            Tag::new("select")
                .attrs(&el.attributes, &["description", "placeholder"])
                .open(out);
            Tag::new("option")
                .attr("value", "")
                .flag("disabled", true)
                .flag("selected", default.is_empty())
                .text(out, placeholder);
            for option in &el.options {
                Tag::new("option")
                    .attr("value", option.value.as_str())
                    .flag("selected", default == option.value)
                    .text(out, &option.label);
            }
            out.close("select");
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
    fn checkbox_label_after_control() {
        let element = WebformElement::new("tos", "I agree", "checkbox");
        assert_eq!(
            html(&element, &StateMapping::new()),
            concat!(
                r#"<div class="form-group form-check">"#,
                r#"<input class="form-check-input" id="form-tos" name="tos" type="checkbox" value="1">"#,
                r#"<label class="form-check-label" for="form-tos">I agree</label>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn checkbox_default_and_checked_state() {
        let element = WebformElement::new("tos", "I agree", "checkbox").property("default_value", "1");
        assert!(html(&element, &StateMapping::new()).contains("<input checked "));

        let unchecked: StateMapping = [("checked", false)].into_iter().collect();
        assert!(!html(&element, &unchecked).contains("checked "));
    }

    #[test]
    fn radios_render_one_block_per_option() {
        let element = WebformElement::new("color", "Color", "radios")
            .option("Red", "red")
            .option("Dark Blue", "Dark Blue")
            .property("default_value", "Dark Blue");
        let out = html(&element, &StateMapping::new());
        assert_eq!(out.matches(r#"<div class="form-check">"#).count(), 2);
        assert!(out.contains(
            r#"<input id="form-color-red" value="red" class="form-check-input" name="color" type="radio">"#
        ));
        assert!(out.contains(
            r#"<input id="form-color-dark-blue" value="Dark Blue" checked class="form-check-input" name="color" type="radio">"#
        ));
        assert!(out.contains(r#"<label class="form-check-label" for="form-color-dark-blue">Dark Blue</label>"#));
        assert!(out.starts_with(r#"<div class="form-group"><label>Color</label>"#));
    }

    #[test]
    fn select_placeholder_and_default() {
        let element = WebformElement::new("size", "Size", "select")
            .option("Small", "s")
            .option("Large", "l");
        let out = html(&element, &StateMapping::new());
        assert!(out.contains(r#"<option value="" disabled selected>-- Select --</option>"#));
        assert!(out.contains(r#"<option value="s">Small</option>"#));

        let element = element.attribute("placeholder", "Pick one").property("default_value", "l");
        let out = html(&element, &StateMapping::new());
        assert!(out.contains(r#"<option value="" disabled>Pick one</option>"#));
        assert!(out.contains(r#"<option value="l" selected>Large</option>"#));
        assert!(!out.contains(r#"placeholder="#));
    }

    #[test]
    fn disabled_state_reaches_select() {
        let element = WebformElement::new("size", "Size", "select");
        let states: StateMapping = [("disabled", true)].into_iter().collect();
        assert!(html(&element, &states).contains(r#"<select class="form-control" disabled id="form-size" name="size">"#));
    }
}
