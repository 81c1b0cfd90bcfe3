//! Minimal in-crate fakes for unit tests.
//!
//! Integration tests use the full in-memory document from `wform-harness`;
//! these fakes only cover what the unit tests in this crate need.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::document::{ChangeListener, ControllingElement, Document, ElementHandle, ListenerId};
use crate::error::SelectorError;

pub(crate) struct FakeInput {
    kind: String,
    value: RefCell<String>,
    checked: Cell<bool>,
    next_id: Cell<ListenerId>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
}

impl FakeInput {
    fn build(kind: &str, value: &str, checked: bool) -> Rc<Self> {
        Rc::new(Self {
            kind: kind.to_owned(),
            value: RefCell::new(value.to_owned()),
            checked: Cell::new(checked),
            next_id: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn text(value: &str) -> ElementHandle {
        Self::build("text", value, false)
    }

    pub(crate) fn checkbox(value: &str, checked: bool) -> ElementHandle {
        Self::build("checkbox", value, checked)
    }

    pub(crate) fn radio(value: &str, checked: bool) -> ElementHandle {
        Self::build("radio", value, checked)
    }

    pub(crate) fn new_checkbox(value: &str, checked: bool) -> Rc<Self> {
        Self::build("checkbox", value, checked)
    }

    pub(crate) fn new_text(value: &str) -> Rc<Self> {
        Self::build("text", value, false)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Change the value and dispatch a change event.
    pub(crate) fn type_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_owned();
        self.fire();
    }

    /// Set checked-ness and dispatch a change event.
    pub(crate) fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
        self.fire();
    }

    pub(crate) fn fire(&self) {
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(self);
        }
    }

    /// Snapshot of the registered listeners, for replaying stale events.
    pub(crate) fn listeners(&self) -> Vec<ChangeListener> {
        self.listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect()
    }
}

impl ControllingElement for FakeInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn input_type(&self) -> String {
        self.kind.clone()
    }

    fn add_change_listener(&self, listener: ChangeListener) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_change_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

/// Selector → elements lookup on exact selector strings.
#[derive(Default)]
pub(crate) struct FakeDocument {
    entries: RefCell<HashMap<String, Vec<ElementHandle>>>,
    queries: Cell<usize>,
}

impl FakeDocument {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn insert(&self, selector: &str, elements: Vec<ElementHandle>) {
        self.entries
            .borrow_mut()
            .insert(selector.to_owned(), elements);
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.get()
    }
}

impl Document for FakeDocument {
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, SelectorError> {
        self.queries.set(self.queries.get() + 1);
        if selector.contains('!') {
            return Err(SelectorError::Malformed {
                selector: selector.to_owned(),
                reason: "unexpected '!'".to_owned(),
            });
        }
        Ok(self
            .entries
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }
}
