//! Per-element state engine: guess, compute, watch, tear down.
//!
//! One [`StateEngine`] serves one dependent element. Its lifecycle:
//!
//! ```text
//! new()        Guessed    mapping seeded from declarations alone
//! attach()     Computed   real values published once, listeners installed
//! change       Computed   one declaration re-evaluated and merged
//! detach()     TornDown   listeners removed, in-flight handlers are no-ops
//! ```
//!
//! # Invariants
//!
//! 1. `attach` publishes the computed mapping exactly once when there is at
//!    least one declaration, even if it equals the guess.
//! 2. A change handler only rewrites the state key of its own declaration.
//! 3. Every listener installed by `attach` is recorded and removed by
//!    `detach`; removal on an element that left the document is a no-op.
//! 4. The liveness flag is cleared before listeners are removed, so a handler
//!    already dispatched when teardown starts publishes nothing.
//! 5. Elements are captured weakly; the engine never keeps a removed element
//!    alive through its own listeners.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Selector matches nothing | State evaluates `false`, no listeners |
//! | Malformed selector | Same as no match |
//! | Unrecognized condition | Declaration evaluates `false` |
//! | `attach` twice | `Err(StatesError::AlreadyAttached)` |
//! | `attach` after `detach` | `Err(StatesError::TornDown)` |

use std::cell::Cell;
use std::rc::{Rc, Weak};

use wform_core::{StateDeclaration, StateMapping};

use crate::document::{ControllingElement, Document, ListenerId};
use crate::error::StatesError;
use crate::reactive::{Observable, Subscription};
use crate::states::condition::{evaluate_group, evaluate_weak_group};
use crate::states::guess::guess_initial_state;
use crate::states::resolver::resolve;

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Seeded with the initial guess; no listeners yet.
    Guessed,
    /// Real values computed; listeners installed.
    Computed,
    /// Listeners removed; no further updates.
    TornDown,
}

struct ListenerRecord {
    element: Weak<dyn ControllingElement>,
    id: ListenerId,
}

/// Reactive state mapping for one dependent element.
pub struct StateEngine {
    document: Rc<dyn Document>,
    declarations: Rc<[StateDeclaration]>,
    states: Observable<StateMapping>,
    listeners: Vec<ListenerRecord>,
    live: Rc<Cell<bool>>,
    phase: EnginePhase,
}

impl StateEngine {
    /// Create an engine seeded with the guessed mapping.
    ///
    /// Nothing is resolved yet; call [`attach`](Self::attach) once the
    /// controlling elements exist in the document.
    #[must_use]
    pub fn new(document: Rc<dyn Document>, declarations: Rc<[StateDeclaration]>) -> Self {
        let states = Observable::new(guess_initial_state(&declarations));
        Self {
            document,
            declarations,
            states,
            listeners: Vec::new(),
            live: Rc::new(Cell::new(false)),
            phase: EnginePhase::Guessed,
        }
    }

    /// Create an engine and attach it immediately.
    #[must_use]
    pub fn attached(document: Rc<dyn Document>, declarations: Rc<[StateDeclaration]>) -> Self {
        let mut engine = Self::new(document, declarations);
        engine.install();
        engine
    }

    /// Compute real state and start watching the controlling elements.
    pub fn attach(&mut self) -> Result<(), StatesError> {
        match self.phase {
            EnginePhase::Guessed => {
                self.install();
                Ok(())
            }
            EnginePhase::Computed => Err(StatesError::AlreadyAttached),
            EnginePhase::TornDown => Err(StatesError::TornDown),
        }
    }

    fn install(&mut self) {
        debug_assert!(self.listeners.is_empty());
        let live = Rc::new(Cell::new(true));
        let mut computed = StateMapping::new();

        for (index, decl) in self.declarations.iter().enumerate() {
            let group = resolve(self.document.as_ref(), &decl.selector);
            // Later declarations with the same state name overwrite earlier ones.
            computed.insert(decl.state.as_str(), evaluate_group(&group, &decl.condition));

            let weak_group: Rc<[Weak<dyn ControllingElement>]> =
                group.iter().map(Rc::downgrade).collect();

            for element in &group {
                let listener = change_handler(
                    Rc::clone(&live),
                    self.states.clone(),
                    Rc::clone(&self.declarations),
                    index,
                    Rc::clone(&weak_group),
                );
                let id = element.add_change_listener(listener);
                self.listeners.push(ListenerRecord {
                    element: Rc::downgrade(element),
                    id,
                });
            }
        }

        self.live = live;
        self.phase = EnginePhase::Computed;

        tracing::debug!(
            declarations = self.declarations.len(),
            listeners = self.listeners.len(),
            states = %computed,
            "state engine attached"
        );

        if !computed.is_empty() {
            self.states.publish(computed);
        }
    }

    /// Remove every listener. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if self.phase == EnginePhase::TornDown {
            return;
        }
        self.teardown();
        self.phase = EnginePhase::TornDown;
    }

    fn teardown(&mut self) {
        self.live.set(false);
        let removed = self.listeners.len();
        for record in self.listeners.drain(..) {
            match record.element.upgrade() {
                Some(element) => element.remove_change_listener(record.id),
                None => tracing::trace!(listener = record.id, "element dropped before teardown"),
            }
        }
        if removed > 0 {
            tracing::debug!(listeners = removed, "state engine detached");
        }
    }

    /// Swap the declaration list.
    ///
    /// Identical lists (same allocation) are a no-op and return `false`.
    /// Otherwise the result depends on the phase:
    ///
    /// | phase | effect |
    /// |-------|--------|
    /// | `Guessed` | guess re-seeded and published; still not attached |
    /// | `Computed` | listeners removed, guess re-seeded, attached again from scratch |
    /// | `TornDown` | list stored; nothing published, no listeners installed |
    pub fn set_declarations(&mut self, declarations: Rc<[StateDeclaration]>) -> bool {
        if Rc::ptr_eq(&self.declarations, &declarations) {
            return false;
        }
        match self.phase {
            EnginePhase::Guessed => {
                self.declarations = declarations;
                self.states.publish(guess_initial_state(&self.declarations));
            }
            EnginePhase::Computed => {
                self.teardown();
                self.declarations = declarations;
                self.states.publish(guess_initial_state(&self.declarations));
                self.install();
            }
            EnginePhase::TornDown => {
                tracing::trace!("declarations swapped on a torn-down engine");
                self.declarations = declarations;
            }
        }
        true
    }

    /// The observable snapshot stream.
    #[must_use]
    pub fn states(&self) -> &Observable<StateMapping> {
        &self.states
    }

    /// Current snapshot.
    #[must_use]
    pub fn current(&self) -> StateMapping {
        self.states.get()
    }

    /// Subscribe a renderer to snapshot updates.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&StateMapping) + 'static) -> Subscription {
        self.states.subscribe(callback)
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Number of installed change listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The declaration list this engine was built from.
    #[must_use]
    pub fn declarations(&self) -> &Rc<[StateDeclaration]> {
        &self.declarations
    }
}

fn change_handler(
    live: Rc<Cell<bool>>,
    states: Observable<StateMapping>,
    declarations: Rc<[StateDeclaration]>,
    index: usize,
    group: Rc<[Weak<dyn ControllingElement>]>,
) -> crate::document::ChangeListener {
    Rc::new(move |_target: &dyn ControllingElement| {
        if !live.get() {
            tracing::trace!("change after teardown ignored");
            return;
        }
        let decl = &declarations[index];
        let value = evaluate_weak_group(&group, &decl.condition);
        tracing::trace!(state = %decl.state, value, "state recomputed");
        states.update(|current| current.with(&decl.state, value));
    })
}

impl Drop for StateEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for StateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateEngine")
            .field("phase", &self.phase)
            .field("declarations", &self.declarations.len())
            .field("listeners", &self.listeners.len())
            .field("states", &self.states.get())
            .finish()
    }
}
