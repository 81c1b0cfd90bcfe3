#![forbid(unsafe_code)]

//! HTML renderers and the form model for wform.

pub mod elements;
pub mod error;
pub mod form;
pub mod markup;
pub mod states;
pub mod submit;
pub mod wrapper;

pub use elements::{Builtin, render_element};
pub use error::SubmitError;
pub use form::Form;
pub use markup::{Markup, Tag};
pub use states::ElementStates;
pub use submit::{
    FormStatus, SubmitHooks, SubmitOutcome, SubmitPhase, SubmitTransport, TransportError,
    form_to_json,
};
pub use wrapper::{ElementWrapper, TitleDisplay};

use wform_core::mapping::{DISABLED, REQUIRED};
use wform_core::{AttrValue, AttributeMap, DenormalizedElement, StateMapping, WebformElement};

/// Everything a renderer needs to draw one element.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub element: &'a WebformElement,
    /// Current state snapshot from the element's engine.
    pub states: &'a StateMapping,
    /// Error reported for this element by the last submission.
    pub error: Option<&'a str>,
    /// Label for submit buttons without their own.
    pub submit_label: &'a str,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(element: &'a WebformElement, states: &'a StateMapping) -> Self {
        Self {
            element,
            states,
            error: None,
            submit_label: wform_core::config::DEFAULT_SUBMIT_LABEL,
        }
    }

    /// Denormalize the element with `overrides`, then apply engine states.
    #[must_use]
    pub fn denormalize(&self, overrides: &AttributeMap) -> DenormalizedElement {
        let mut element = wform_core::denormalize(self.element, Some(overrides));
        apply_states(&mut element.attributes, self.states);
        element
    }
}

/// Let `required` and `disabled` from the engine override schema attributes.
pub fn apply_states(attributes: &mut AttributeMap, states: &StateMapping) {
    for key in [REQUIRED, DISABLED] {
        if let Some(on) = states.get(key) {
            attributes.insert(key.to_owned(), AttrValue::Bool(on));
        }
    }
}

/// Build an override map from literal pairs.
#[must_use]
pub fn overrides<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> AttributeMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), AttrValue::Text(v.to_owned())))
        .collect()
}

/// Renders one element type.
///
/// Custom renderers registered on a [`Form`] replace the built-in renderer
/// for their type. Closures with the right signature implement this trait.
pub trait ElementRenderer {
    fn render(&self, ctx: &RenderContext<'_>, out: &mut Markup);
}

impl<F> ElementRenderer for F
where
    F: Fn(&RenderContext<'_>, &mut Markup),
{
    fn render(&self, ctx: &RenderContext<'_>, out: &mut Markup) {
        self(ctx, out);
    }
}
