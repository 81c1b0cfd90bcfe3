//! Built-in renderers, one per schema element type.
//!
//! | type | output |
//! |------|--------|
//! | `textfield` | `<input type="text">` |
//! | `tel`, `number`, `email` | `<input>` of that type |
//! | `hidden` | bare `<input type="hidden">`, no wrapper |
//! | `textarea` | `<textarea>` |
//! | `checkbox`, `radio` | single control, value `1`, label after |
//! | `checkboxes`, `radios` | one control per option |
//! | `select` | `<select>` with a disabled placeholder option |
//! | `processed_text` | trusted markup |
//! | `webform_actions` | submit button |
//!
//! Unknown types render nothing.

pub mod choice;
pub mod input;
pub mod text;

use crate::markup::Markup;
use crate::{ElementRenderer, RenderContext};

/// Render `ctx.element` with the built-in renderer for its type.
pub fn render_element(ctx: &RenderContext<'_>, out: &mut Markup) {
    match ctx.element.kind.as_str() {
        "textfield" => input::render_input(ctx, "text", out),
        kind @ ("tel" | "number" | "email" | "hidden") => input::render_input(ctx, kind, out),
        "textarea" => input::render_textarea(ctx, out),
        "checkbox" | "radio" => choice::render_checkbox(ctx, out),
        "checkboxes" => choice::render_group(ctx, "checkbox", out),
        "radios" => choice::render_group(ctx, "radio", out),
        "select" => choice::render_select(ctx, out),
        "processed_text" => text::render_processed_text(ctx, out),
        "webform_actions" => text::render_actions(ctx, out),
        _ => {}
    }
}

/// The built-in renderers as an [`ElementRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtin;

impl ElementRenderer for Builtin {
    fn render(&self, ctx: &RenderContext<'_>, out: &mut Markup) {
        render_element(ctx, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wform_core::{StateMapping, WebformElement};

    #[test]
    fn unknown_types_render_nothing() {
        let element = WebformElement::new("x", "X", "webform_signature");
        let states = StateMapping::new();
        let mut out = Markup::new();
        Builtin.render(&RenderContext::new(&element, &states), &mut out);
        assert!(out.is_empty());
    }
}
