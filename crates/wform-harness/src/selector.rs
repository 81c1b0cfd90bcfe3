//! CSS selector matching for [`MemoryDocument`](crate::MemoryDocument),
//! backed by `scraper` (and through it the `selectors` crate).
//!
//! Every query renders the current controls as a flat HTML fragment, each
//! tagged with its position in the document, parses it, and maps the matches
//! back to the live elements. Attribute selectors therefore see the markup
//! attributes, never the live value or checked-ness.
//!
//! | selector input | result |
//! |----------------|--------|
//! | blank | [`SelectorError::Empty`] |
//! | unknown pseudo-class (`:checked`, an unstripped `:input`) | [`SelectorError::Unsupported`] |
//! | anything else that does not parse | [`SelectorError::Malformed`] |

use std::fmt::Write as _;
use std::rc::Rc;

use scraper::error::SelectorErrorKind;
use scraper::{Html, Selector};
use v_htmlescape::escape;
use wform_runtime::SelectorError;

use crate::element::MemoryElement;

/// Attribute carrying each control's index in the rendered fragment.
const NODE_ATTR: &str = "data-wform-node";

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parse `selector`, mapping parser failures onto [`SelectorError`].
pub fn compile(selector: &str) -> Result<Selector, SelectorError> {
    if selector.trim().is_empty() {
        return Err(SelectorError::Empty);
    }
    Selector::parse(selector).map_err(|err| match err {
        SelectorErrorKind::UnexpectedSelectorParseError(_) => SelectorError::Unsupported {
            selector: selector.to_owned(),
            feature: err.to_string(),
        },
        _ => SelectorError::Malformed {
            selector: selector.to_owned(),
            reason: err.to_string(),
        },
    })
}

fn render_fragment(nodes: &[Rc<MemoryElement>]) -> String {
    let mut html = String::new();
    for (index, node) in nodes.iter().enumerate() {
        let tag = node.tag();
        let _ = write!(html, "<{tag} {NODE_ATTR}=\"{index}\"");
        for (name, value) in node.attributes() {
            if name == NODE_ATTR {
                continue;
            }
            let _ = write!(html, " {name}=\"{}\"", escape(&value));
        }
        html.push('>');
        if !VOID_TAGS.contains(&tag) {
            let _ = write!(html, "</{tag}>");
        }
    }
    html
}

/// The elements of `nodes` matched by `selector`, in document order.
#[must_use]
pub fn select(nodes: &[Rc<MemoryElement>], selector: &Selector) -> Vec<Rc<MemoryElement>> {
    let fragment = Html::parse_fragment(&render_fragment(nodes));
    fragment
        .select(selector)
        .filter_map(|found| found.value().attr(NODE_ATTR)?.parse::<usize>().ok())
        .filter_map(|index| nodes.get(index).cloned())
        .collect()
}
