//! Selector resolution against the live document.
//!
//! Schema selectors use jQuery style with a leading marker, e.g.
//! `:input[name="foo"]`. The resolver strips exactly that one marker character
//! and hands the rest to [`Document::query_selector_all`]. Note that
//! `:input[...]` therefore becomes `input[...]`, which does not match
//! `select` or `textarea` elements.
//!
//! Resolution never fails: a missing marker, an empty remainder, or a query
//! error all yield an empty group.

use crate::document::{Document, ElementHandle};

/// Marker character every schema selector starts with.
pub const SELECTOR_MARKER: char = ':';

/// Strip the leading marker, returning `None` when it is absent or nothing
/// remains.
#[must_use]
pub fn strip_marker(selector: &str) -> Option<&str> {
    selector
        .strip_prefix(SELECTOR_MARKER)
        .filter(|rest| !rest.trim().is_empty())
}

/// Resolve a schema selector to the controlling elements currently in `document`.
#[must_use]
pub fn resolve(document: &dyn Document, selector: &str) -> Vec<ElementHandle> {
    let Some(css) = strip_marker(selector) else {
        tracing::debug!(selector, "selector lacks marker; treating as unresolvable");
        return Vec::new();
    };
    match document.query_selector_all(css) {
        Ok(elements) => {
            tracing::trace!(selector, matched = elements.len(), "resolved selector");
            elements
        }
        Err(err) => {
            tracing::debug!(selector, error = %err, "selector query failed; treating as unresolvable");
            Vec::new()
        }
    }
}
