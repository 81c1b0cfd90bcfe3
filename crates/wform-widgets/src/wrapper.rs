//! The `form-group` wrapper around every labelled element.
//!
//! The wrapper owns everything that is not the control itself: hidden-state
//! suppression, the label and its placement, the error feedback block, and
//! the description. A hidden element renders nothing at all, so the control
//! leaves the submitted payload too.

use wform_core::{AttrValue, DenormalizedElement, StateMapping};

use crate::markup::{Markup, Tag};

/// Inline style that hides a label visually but keeps it for screen readers.
pub const TITLE_HIDDEN_STYLE: &str = "position:absolute;overflow:hidden;clip:rect(1px,1px,1px,1px);width:1px;height:1px;word-wrap:normal";

/// Where the label goes relative to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleDisplay {
    Before,
    After,
}

/// Whether the label should be visually hidden (`title_display: invisible`).
#[must_use]
pub fn is_title_hidden(element: &DenormalizedElement) -> bool {
    element.property("title_display") == Some("invisible")
}

/// Label placement; anything but `after` means before.
#[must_use]
pub fn title_display(element: &DenormalizedElement) -> TitleDisplay {
    match element.property("title_display") {
        Some("after") => TitleDisplay::After,
        _ => TitleDisplay::Before,
    }
}

fn class_list<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let joined = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn text_of<'a>(map: &'a wform_core::AttributeMap, key: &str) -> Option<&'a str> {
    map.get(key).and_then(AttrValue::as_text)
}

/// Wrapper configuration for one element.
#[derive(Debug, Clone, Copy)]
pub struct ElementWrapper<'a> {
    element: &'a DenormalizedElement,
    states: &'a StateMapping,
    error: Option<&'a str>,
    label_for: Option<&'a str>,
    label_class: Option<&'a str>,
    class: Option<&'a str>,
}

impl<'a> ElementWrapper<'a> {
    #[must_use]
    pub fn new(element: &'a DenormalizedElement, states: &'a StateMapping) -> Self {
        Self {
            element,
            states,
            error: None,
            label_for: None,
            label_class: None,
            class: None,
        }
    }

    /// Server or validation error to show under the control.
    #[must_use]
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Id the label points at.
    #[must_use]
    pub fn label_for(mut self, id: &'a str) -> Self {
        self.label_for = Some(id);
        self
    }

    /// Extra class on the label.
    #[must_use]
    pub fn label_class(mut self, class: &'a str) -> Self {
        self.label_class = Some(class);
        self
    }

    /// Extra class on the wrapper.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Whether the wrapper will render nothing.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.states.is_hidden()
    }

    fn write_label(&self, out: &mut Markup) {
        let element = self.element;
        if element.title.is_empty() {
            return;
        }
        let class = class_list([
            self.label_class,
            text_of(&element.label_attributes, "className"),
        ]);
        Tag::new("label")
            .attr_opt("style", is_title_hidden(element).then_some(TITLE_HIDDEN_STYLE))
            .attr_opt("class", class.as_deref())
            .attr_opt("for", self.label_for)
            .text(out, &element.title);
    }

    /// Render the wrapper around `body`.
    pub fn render(self, out: &mut Markup, body: impl FnOnce(&mut Markup)) {
        if self.is_hidden() {
            return;
        }
        let element = self.element;
        let required = element.attributes.get("required").is_some_and(AttrValue::is_true);
        let class = class_list([
            Some("form-group"),
            self.error.map(|_| "is-invalid"),
            self.class,
            text_of(&element.wrapper_attributes, "className"),
            required.then_some("required"),
        ]);

        Tag::new("div").attr_opt("class", class.as_deref()).open(out);
        let display = title_display(element);
        if display == TitleDisplay::Before {
            self.write_label(out);
        }
        body(out);
        if display == TitleDisplay::After {
            self.write_label(out);
        }
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            Tag::new("div")
                .attr("class", "form-text invalid-feedback")
                .text(out, error);
        }
        if let Some(description) = text_of(&element.attributes, "description").filter(|d| !d.is_empty()) {
            Tag::new("div")
                .attr("class", "form-text description")
                .raw(out, description);
        }
        out.close("div");
    }
}
