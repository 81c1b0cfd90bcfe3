//! In-memory document with user-interaction helpers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wform_runtime::{ControllingElement, Document, ElementHandle, SelectorError};

use crate::element::MemoryElement;
use crate::selector::{compile, select};

/// A flat, ordered list of form controls that answers CSS queries.
///
/// Queries go through [`selector`](crate::selector); every control is a
/// sibling of every other, so descendant combinators never match.
///
/// Queries see the document at call time: removed elements stop matching
/// immediately, appended ones start matching on the next query.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: RefCell<Vec<Rc<MemoryElement>>>,
    queries: Cell<usize>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Append an element at the end of the document.
    pub fn append(&self, element: MemoryElement) -> Rc<MemoryElement> {
        let element = Rc::new(element);
        element.set_connected(true);
        self.nodes.borrow_mut().push(Rc::clone(&element));
        element
    }

    /// Remove an element. Returns `false` if it was not in this document.
    ///
    /// Listeners stay registered on the element itself; the document only
    /// stops returning it from queries.
    pub fn remove(&self, element: &Rc<MemoryElement>) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        let before = nodes.len();
        nodes.retain(|n| !Rc::ptr_eq(n, element));
        let removed = nodes.len() != before;
        if removed {
            element.set_connected(false);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Snapshot of every element, in document order.
    pub fn elements(&self) -> Vec<Rc<MemoryElement>> {
        self.nodes.borrow().clone()
    }

    /// Every element whose `name` attribute equals `name`.
    pub fn by_name(&self, name: &str) -> Vec<Rc<MemoryElement>> {
        self.nodes
            .borrow()
            .iter()
            .filter(|n| n.name().as_deref() == Some(name))
            .cloned()
            .collect()
    }

    /// First element named `name`.
    pub fn first_by_name(&self, name: &str) -> Option<Rc<MemoryElement>> {
        self.nodes
            .borrow()
            .iter()
            .find(|n| n.name().as_deref() == Some(name))
            .cloned()
    }

    /// Element with `id`.
    pub fn by_id(&self, id: &str) -> Option<Rc<MemoryElement>> {
        self.nodes
            .borrow()
            .iter()
            .find(|n| n.attribute("id").as_deref() == Some(id))
            .cloned()
    }

    /// Typed query returning concrete elements.
    pub fn query(&self, selector: &str) -> Result<Vec<Rc<MemoryElement>>, SelectorError> {
        self.queries.set(self.queries.get() + 1);
        let selector = compile(selector)?;
        Ok(select(&self.nodes.borrow(), &selector))
    }

    /// Number of queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    // ========================================================================
    // User interaction
    // ========================================================================

    /// Replace a text-like control's value and dispatch a change.
    pub fn type_text(&self, element: &MemoryElement, text: &str) {
        element.set_value(text);
        element.dispatch_change();
    }

    /// Click a control.
    ///
    /// A checkbox toggles. A radio becomes checked and unchecks the other
    /// radios sharing its name; only the clicked radio dispatches, and only
    /// if it was not already checked. Other controls are left alone.
    pub fn click(&self, element: &MemoryElement) {
        match element.input_type().as_str() {
            "checkbox" => {
                element.set_checked(!element.is_checked());
                element.dispatch_change();
            }
            "radio" => {
                if element.is_checked() {
                    return;
                }
                if let Some(name) = element.name() {
                    for other in self.by_name(&name) {
                        if other.input_type() == "radio" {
                            other.set_checked(false);
                        }
                    }
                }
                element.set_checked(true);
                element.dispatch_change();
            }
            _ => {}
        }
    }

    /// Choose an option of a select control and dispatch a change.
    pub fn select_option(&self, element: &MemoryElement, value: &str) {
        element.set_value(value);
        element.dispatch_change();
    }
}

impl Document for MemoryDocument {
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, SelectorError> {
        Ok(self
            .query(selector)?
            .into_iter()
            .map(|n| n as ElementHandle)
            .collect())
    }
}
