//! In-memory form control.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use wform_runtime::{ChangeListener, ControllingElement, ListenerId};

/// A form control living in a [`MemoryDocument`](crate::MemoryDocument).
///
/// Attributes are static markup; `value` and `checked` are live state, the
/// way a browser separates `defaultValue` from `value`. Mutating live state
/// through the setters does not dispatch anything; use the document's
/// interaction helpers to simulate the user.
pub struct MemoryElement {
    tag: String,
    attributes: RefCell<AHashMap<String, String>>,
    value: RefCell<String>,
    checked: Cell<bool>,
    connected: Cell<bool>,
    next_listener: Cell<ListenerId>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener)>>,
}

impl MemoryElement {
    /// A detached element with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: RefCell::new(AHashMap::new()),
            value: RefCell::new(String::new()),
            checked: Cell::new(false),
            connected: Cell::new(false),
            next_listener: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// `<input type=kind name=name>`.
    #[must_use]
    pub fn input(kind: &str, name: &str) -> Self {
        Self::new("input").attr("type", kind).attr("name", name)
    }

    /// Set an attribute. Setting `value` also sets the live value.
    #[must_use]
    pub fn attr(self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the initial checked-ness.
    #[must_use]
    pub fn checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    /// Set the initial live value without touching the `value` attribute.
    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        *self.value.borrow_mut() = value.into();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "value" {
            self.value.borrow_mut().clone_from(&value);
        }
        self.attributes.borrow_mut().insert(name.to_owned(), value);
    }

    /// Every markup attribute, in no particular order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.attributes
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow_mut().remove(name)
    }

    pub fn name(&self) -> Option<String> {
        self.attribute("name")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attributes
            .borrow()
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.set(connected);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Invoke every change listener, in registration order.
    ///
    /// Listeners are snapshotted first so they may add or remove listeners
    /// on this element while running.
    pub fn dispatch_change(&self) {
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        tracing::trace!(
            tag = %self.tag,
            name = self.name().as_deref().unwrap_or(""),
            listeners = listeners.len(),
            "dispatch change"
        );
        for listener in listeners {
            listener(self);
        }
    }
}

impl ControllingElement for MemoryElement {
    fn value(&self) -> String {
        let value = self.value.borrow();
        // Checkable inputs without a value attribute report "on".
        if value.is_empty() && self.is_checkable() && self.attribute("value").is_none() {
            return "on".to_owned();
        }
        value.clone()
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn input_type(&self) -> String {
        match self.tag.as_str() {
            "input" => self
                .attribute("type")
                .map(|t| t.to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_owned()),
            other => other.to_owned(),
        }
    }

    fn add_change_listener(&self, listener: ChangeListener) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_change_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.tag)
            .field("name", &self.name())
            .field("value", &*self.value.borrow())
            .field("checked", &self.checked.get())
            .field("connected", &self.connected.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
