//! Non-input elements: processed markup and the submit button.

use wform_core::AttributeMap;

use crate::RenderContext;
use crate::markup::{Markup, Tag};
use crate::wrapper::ElementWrapper;

/// Trusted markup from the `markup` property, wrapped like any element.
pub fn render_processed_text(ctx: &RenderContext<'_>, out: &mut Markup) {
    let el = ctx.denormalize(&AttributeMap::new());
    let markup = ctx.element.raw_property("markup").unwrap_or("");
    ElementWrapper::new(&el, ctx.states)
        .error(ctx.error)
        .render(out, |out| Tag::new("div").raw(out, markup));
}

/// Submit button labelled by `submit__label`, else the form default.
pub fn render_actions(ctx: &RenderContext<'_>, out: &mut Markup) {
    let label = ctx
        .element
        .raw_property("submit__label")
        .filter(|l| !l.is_empty())
        .unwrap_or(ctx.submit_label);
    Tag::new("div").attr("class", "form-group").open(out);
    Tag::new("button").attr("type", "submit").text(out, label);
    out.close("div");
}

#[cfg(test)]
mod tests {
    use super::*;
    use wform_core::{StateMapping, WebformElement};

    #[test]
    fn processed_text_is_trusted() {
        let element = WebformElement::new("intro", "", "processed_text").property("markup", "<p>Hi</p>");
        let states = StateMapping::new();
        let mut out = Markup::new();
        render_processed_text(&RenderContext::new(&element, &states), &mut out);
        assert_eq!(out.as_str(), r#"<div class="form-group"><div><p>Hi</p></div></div>"#);
    }

    #[test]
    fn actions_label_fallbacks() {
        let states = StateMapping::new();
        let own = WebformElement::new("actions", "", "webform_actions").property("submit__label", "Send");
        let mut out = Markup::new();
        render_actions(&RenderContext::new(&own, &states), &mut out);
        assert_eq!(
            out.as_str(),
            r#"<div class="form-group"><button type="submit">Send</button></div>"#
        );

        let bare = WebformElement::new("actions", "", "webform_actions");
        let mut ctx = RenderContext::new(&bare, &states);
        ctx.submit_label = "Go";
        let mut out = Markup::new();
        render_actions(&ctx, &mut out);
        assert!(out.as_str().contains(">Go</button>"));
    }
}
