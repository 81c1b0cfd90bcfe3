//! Minimal HTML writer.
//!
//! Renderers append to a [`Markup`] buffer through [`Tag`], which escapes
//! attribute values, and [`Markup::text`], which escapes text content. Both
//! use `v_htmlescape`, so quotes and `/` are escaped as well as `<>&`.
//! [`Markup::raw`] is reserved for HTML the schema marks as trusted
//! (processed text, descriptions).

use std::fmt::{self, Write};

use v_htmlescape::escape;
use wform_core::{AttrValue, AttributeMap};

/// Map a DOM property name back to its HTML attribute name.
#[must_use]
pub fn html_attribute_name(name: &str) -> &str {
    match name {
        "className" => "class",
        "autoComplete" => "autocomplete",
        "htmlFor" => "for",
        other => other,
    }
}

/// An HTML output buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    html: String,
}

impl Markup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append escaped text.
    pub fn text(&mut self, text: &str) -> &mut Self {
        // Writing to a String cannot fail.
        let _ = write!(self.html, "{}", escape(text));
        self
    }

    /// Append trusted HTML verbatim.
    pub fn raw(&mut self, html: &str) -> &mut Self {
        self.html.push_str(html);
        self
    }

    /// Append a closing tag.
    pub fn close(&mut self, name: &str) -> &mut Self {
        let _ = write!(self.html, "</{name}>");
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.html
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// An opening tag under construction.
///
/// Attributes are written in insertion order. Boolean attributes are written
/// bare when `true` and omitted when `false`.
#[derive(Debug, Clone)]
#[must_use]
pub struct Tag {
    name: &'static str,
    attrs: Vec<(String, Option<String>)>,
}

impl Tag {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    /// Add `name="value"`, replacing an earlier value for the same name.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, Some(value.into()));
        self
    }

    /// Add `name="value"` when `value` is present.
    pub fn attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Add a bare boolean attribute when `on`; remove it otherwise.
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.set(name, None);
        } else {
            self.attrs.retain(|(n, _)| n != name);
        }
        self
    }

    /// Add every entry of a denormalized attribute map, skipping `skip`.
    pub fn attrs(mut self, map: &AttributeMap, skip: &[&str]) -> Self {
        for (key, value) in map {
            if skip.contains(&key.as_str()) {
                continue;
            }
            let name = html_attribute_name(key);
            self = match value {
                AttrValue::Bool(on) => self.flag(name, *on),
                AttrValue::Text(text) => self.attr(name, text.as_str()),
            };
        }
        self
    }

    fn set(&mut self, name: &str, value: Option<String>) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    fn write_open(&self, out: &mut Markup) {
        let html = &mut out.html;
        let _ = write!(html, "<{}", self.name);
        for (name, value) in &self.attrs {
            match value {
                Some(value) => {
                    let _ = write!(html, " {name}=\"{}\"", escape(value));
                }
                None => {
                    let _ = write!(html, " {name}");
                }
            }
        }
        html.push('>');
    }

    /// Write the opening tag; the caller closes it.
    pub fn open(self, out: &mut Markup) {
        self.write_open(out);
    }

    /// Write a void element (`<input>`, `<br>`).
    pub fn void(self, out: &mut Markup) {
        self.write_open(out);
    }

    /// Write the element with escaped text content and its closing tag.
    pub fn text(self, out: &mut Markup, text: &str) {
        let name = self.name;
        self.write_open(out);
        out.text(text).close(name);
    }

    /// Write the element with trusted inner HTML and its closing tag.
    pub fn raw(self, out: &mut Markup, html: &str) {
        let name = self.name;
        self.write_open(out);
        out.raw(html).close(name);
    }
}
