//! Document boundary consumed by the state engine.
//!
//! The engine never talks to a concrete DOM. It needs two capabilities:
//!
//! - [`Document`]: run a selector against the live document and return the
//!   matching controlling elements, in document order.
//! - [`ControllingElement`]: read value, checked-ness, and type of one element,
//!   and subscribe/unsubscribe change listeners on it.
//!
//! # Contract for implementors
//!
//! 1. `query_selector_all` reflects the document at call time; no caching.
//! 2. `remove_change_listener` with an unknown id is a no-op, including on an
//!    element that has since been removed from the document.
//! 3. Listeners are invoked in registration order, synchronously, once per
//!    dispatched change.

use std::rc::Rc;

use crate::error::SelectorError;

/// Identifier of a registered change listener, unique per element.
pub type ListenerId = u64;

/// Callback invoked with the element whose value changed.
pub type ChangeListener = Rc<dyn Fn(&dyn ControllingElement)>;

/// A rendered input-like widget whose value feeds condition evaluation.
pub trait ControllingElement {
    /// Current text value (`""` when empty).
    fn value(&self) -> String;

    /// Checked-ness; only meaningful for checkbox and radio widgets.
    fn is_checked(&self) -> bool;

    /// Type tag, e.g. `"text"`, `"checkbox"`, `"radio"`, `"select"`.
    fn input_type(&self) -> String;

    /// Register a change listener.
    fn add_change_listener(&self, listener: ChangeListener) -> ListenerId;

    /// Remove a change listener. Unknown ids are ignored.
    fn remove_change_listener(&self, id: ListenerId);

    /// Whether this element carries checked-ness (checkbox or radio).
    fn is_checkable(&self) -> bool {
        matches!(self.input_type().as_str(), "checkbox" | "radio")
    }
}

/// Shared handle to a controlling element.
pub type ElementHandle = Rc<dyn ControllingElement>;

/// A queryable document.
pub trait Document {
    /// Return every element matching a standard CSS selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, SelectorError>;
}

impl<D: Document + ?Sized> Document for Rc<D> {
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, SelectorError> {
        (**self).query_selector_all(selector)
    }
}
