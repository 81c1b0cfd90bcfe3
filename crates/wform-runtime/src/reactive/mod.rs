#![forbid(unsafe_code)]

//! Change-tracking primitives used to publish state snapshots.
//!
//! - [`Observable`]: a shared, version-tracked value with subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: a derived, lazily evaluated read view.
//! - [`BindingScope`]: owns the subscriptions of one renderer.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks and cleaned up lazily
//! during notification, so dropping a [`Subscription`] is all it takes to
//! disconnect.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped};
pub use observable::{Observable, Subscription};
