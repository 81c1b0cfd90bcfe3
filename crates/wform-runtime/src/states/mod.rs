//! Conditional state evaluation for webform elements.
//!
//! Components, leaf first:
//!
//! - [`evaluate`]: one element against one condition set.
//! - [`evaluate_group`]: OR over every element a selector matched.
//! - [`resolve`]: schema selector to live elements.
//! - [`guess_initial_state`]: flicker-avoiding seed for the first render.
//! - [`StateEngine`]: ties them together per dependent element and keeps the
//!   published [`StateMapping`](wform_core::StateMapping) current.

pub mod condition;
pub mod engine;
pub mod guess;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use condition::{evaluate, evaluate_group};
pub use engine::{EnginePhase, StateEngine};
pub use guess::guess_initial_state;
pub use resolver::{SELECTOR_MARKER, resolve, strip_marker};
