//! Per-element state wiring between the engine and the renderer.

use std::cell::Cell;
use std::rc::Rc;

use wform_core::{StateDeclaration, StateMapping, WebformElement};
use wform_runtime::reactive::bind_mapped;
use wform_runtime::{Binding, BindingScope, Document, StateEngine, StatesError};

/// The state engine of one rendered element plus the views the renderer reads.
///
/// The declaration list is allocated once per schema revision; handing the
/// engine an equal list again keeps the same allocation so nothing is torn
/// down.
pub struct ElementStates {
    name: String,
    engine: StateEngine,
    hidden: Binding<bool>,
    dirty: Rc<Cell<bool>>,
    scope: BindingScope,
}

impl ElementStates {
    /// Build the engine for `element`, seeded with the initial guess.
    #[must_use]
    pub fn new(document: Rc<dyn Document>, element: &WebformElement) -> Self {
        let declarations: Rc<[StateDeclaration]> = element.states.as_slice().into();
        let engine = StateEngine::new(document, declarations);
        let hidden = bind_mapped(engine.states(), StateMapping::is_hidden);
        let dirty = Rc::new(Cell::new(false));

        let mut scope = BindingScope::new();
        {
            let dirty = Rc::clone(&dirty);
            scope.subscribe(engine.states(), move |_| dirty.set(true));
        }

        Self {
            name: element.name.clone(),
            engine,
            hidden,
            dirty,
            scope,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compute real states and start listening.
    pub fn attach(&mut self) -> Result<(), StatesError> {
        self.engine.attach()
    }

    /// Stop listening.
    pub fn detach(&mut self) {
        self.engine.detach();
        self.scope.clear();
    }

    /// Follow a new schema revision of the same element.
    ///
    /// Declarations are compared by content: an equal list from a new
    /// revision keeps the engine and its listeners. Returns `true` if the
    /// list changed and was handed to the engine.
    pub fn update(&mut self, element: &WebformElement) -> bool {
        if self.engine.declarations()[..] == element.states[..] {
            return false;
        }
        self.engine.set_declarations(element.states.as_slice().into())
    }

    /// Current state snapshot.
    #[must_use]
    pub fn current(&self) -> StateMapping {
        self.engine.current()
    }

    /// Whether the element is hidden right now.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// The hidden view, for renderers that keep it.
    #[must_use]
    pub fn hidden(&self) -> &Binding<bool> {
        &self.hidden
    }

    /// Whether a snapshot was published since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    #[must_use]
    pub fn engine(&self) -> &StateEngine {
        &self.engine
    }
}

impl std::fmt::Debug for ElementStates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementStates")
            .field("name", &self.name)
            .field("engine", &self.engine)
            .field("dirty", &self.dirty.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wform_harness::fixtures::{show_extra_invisible, toggle_form};
    use wform_harness::mounted;

    #[test]
    fn hidden_follows_engine() {
        let form = toggle_form();
        let doc = mounted(&form);
        let extra = form.element("extra").unwrap();
        let mut states = ElementStates::new(doc.clone(), extra);
        assert!(states.is_hidden());
        assert!(!states.take_dirty());

        states.attach().unwrap();
        assert!(states.take_dirty());
        assert!(!states.take_dirty());

        let hidden = states.hidden().clone();
        doc.click(&doc.first_by_name("show_extra").unwrap());
        assert!(!hidden.get());
        assert!(states.take_dirty());
    }

    #[test]
    fn equal_declarations_do_not_rebuild() {
        let form = toggle_form();
        let doc = mounted(&form);
        let extra = form.element("extra").unwrap();
        let mut states = ElementStates::new(doc.clone(), extra);
        states.attach().unwrap();

        assert!(!states.update(&extra.clone()));
        let changed = extra.clone().state(show_extra_invisible());
        assert!(states.update(&changed));
        assert_eq!(states.engine().declarations().len(), 2);
    }

    #[test]
    fn detach_releases_listeners_and_scope() {
        let form = toggle_form();
        let doc = mounted(&form);
        let mut states = ElementStates::new(doc.clone(), form.element("extra").unwrap());
        states.attach().unwrap();
        let show = doc.first_by_name("show_extra").unwrap();
        assert_eq!(show.listener_count(), 1);
        states.detach();
        assert_eq!(show.listener_count(), 0);
        doc.click(&show);
        assert!(!states.take_dirty());
    }
}
