#![forbid(unsafe_code)]

//! Reactive state engine for wform.
//!
//! The runtime watches controlling form elements through the [`document`]
//! boundary, evaluates each element's state declarations, and publishes a
//! [`StateMapping`](wform_core::StateMapping) per dependent element through
//! [`reactive::Observable`].
//!
//! Everything here is single-threaded and synchronous: handlers run inside
//! the change dispatch of the document that owns the elements.

pub mod document;
pub mod error;
pub mod reactive;
pub mod states;

pub use document::{ChangeListener, ControllingElement, Document, ElementHandle, ListenerId};
pub use error::{SelectorError, StatesError};
pub use reactive::{Binding, BindingScope, Observable, Subscription};
pub use states::{
    EnginePhase, StateEngine, evaluate, evaluate_group, guess_initial_state, resolve,
};
