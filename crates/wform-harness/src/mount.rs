//! Populate a [`MemoryDocument`] with the controls a webform renders.
//!
//! Only controls are mounted: wrappers, labels, and markup carry no value and
//! never match a state selector. The control attributes (`name`, `type`,
//! `value`, `id`, `class`) and default values follow the markup renderer, so
//! selectors written against the rendered HTML find the same elements here.

use std::rc::Rc;

use wform_core::{AttrValue, Webform, WebformElement, denormalize, element_id, option_id};

use crate::document::MemoryDocument;
use crate::element::MemoryElement;

/// Input types rendered as a plain `<input type=...>`.
const INPUT_KINDS: &[(&str, &str)] = &[
    ("textfield", "text"),
    ("email", "email"),
    ("tel", "tel"),
    ("number", "number"),
    ("hidden", "hidden"),
];

fn class_attr(element: &WebformElement, base: &str) -> String {
    let own = denormalize(element, None)
        .attribute_text("className")
        .map(str::to_owned);
    match own {
        Some(own) => format!("{base} {own}"),
        None => base.to_owned(),
    }
}

fn default_value(element: &WebformElement) -> Option<String> {
    element.raw_property("default_value").map(str::to_owned)
}

/// Mount one schema element. Returns the controls created, in order.
pub fn mount_element(document: &MemoryDocument, element: &WebformElement) -> Vec<Rc<MemoryElement>> {
    let name = element.name.as_str();
    let default = default_value(element);

    if let Some((_, input_type)) = INPUT_KINDS.iter().find(|(kind, _)| *kind == element.kind) {
        let control = MemoryElement::input(input_type, name)
            .attr("id", element_id(name))
            .attr("class", class_attr(element, "form-control"))
            .with_value(default.unwrap_or_default());
        return vec![document.append(control)];
    }

    match element.kind.as_str() {
        "textarea" => {
            let control = MemoryElement::new("textarea")
                .attr("name", name)
                .attr("id", element_id(name))
                .attr("class", class_attr(element, "form-control"))
                .with_value(default.unwrap_or_default());
            vec![document.append(control)]
        }
        "select" => {
            let control = MemoryElement::new("select")
                .attr("name", name)
                .attr("id", element_id(name))
                .attr("class", class_attr(element, "form-control"))
                .with_value(default.unwrap_or_default());
            vec![document.append(control)]
        }
        "checkbox" | "radio" => {
            let control = MemoryElement::input(&element.kind, name)
                .attr("id", element_id(name))
                .attr("class", class_attr(element, "form-check-input"))
                .attr("value", "1")
                .checked(default.is_some_and(|d| AttrValue::coerce(&d).is_truthy()));
            vec![document.append(control)]
        }
        "checkboxes" | "radios" => {
            let input_type = if element.kind == "checkboxes" { "checkbox" } else { "radio" };
            element
                .options
                .iter()
                .map(|option| {
                    let control = MemoryElement::input(input_type, name)
                        .attr("id", option_id(name, &option.value))
                        .attr("class", "form-check-input")
                        .attr("value", option.value.as_str())
                        .checked(default.as_deref() == Some(option.value.as_str()));
                    document.append(control)
                })
                .collect()
        }
        other => {
            tracing::trace!(name, kind = other, "no control mounted");
            Vec::new()
        }
    }
}

/// Mount every element of `webform`, in schema order.
pub fn mount(document: &MemoryDocument, webform: &Webform) -> Vec<Rc<MemoryElement>> {
    webform
        .elements
        .iter()
        .flat_map(|element| mount_element(document, element))
        .collect()
}

/// A fresh document with `webform` mounted.
#[must_use]
pub fn mounted(webform: &Webform) -> Rc<MemoryDocument> {
    let document = MemoryDocument::new();
    mount(&document, webform);
    document
}
