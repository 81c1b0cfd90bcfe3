#![forbid(unsafe_code)]

//! Read bindings and subscription scopes over [`Observable`] values.
//!
//! A [`Binding<T>`] derives a value from an observable on each `get()`; the
//! renderers use it to read e.g. "is this element hidden" from a state
//! mapping without holding the mapping themselves.
//!
//! A [`BindingScope`] owns the subscriptions of one logical owner (a rendered
//! element, a form) and releases them all when dropped or cleared.
//!
//! # Invariants
//!
//! 1. `Binding::get()` always reflects the current source value (no caching).
//! 2. After a scope is dropped or cleared, none of its callbacks fire.
//! 3. `binding_count()` equals the number of held subscriptions.

use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A read-only, lazily evaluated view of an observable.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Current bound value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// Binding that maps the observable's value through `map` by reference.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding {
        eval: Rc::new(move || src.with(|v| map(v))),
    }
}

/// Holds the subscriptions of one owner.
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe to `source` for the scope's lifetime.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub = source.subscribe(callback);
        self.subscriptions.push(sub);
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the scope holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every subscription now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}
