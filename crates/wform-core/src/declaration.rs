//! State declarations: `(state, selector, condition)` triples.

use serde::{Deserialize, Serialize};

use crate::condition::ConditionSet;

/// One conditional rule attached to a dependent element.
///
/// `state` names the output key (`"invisible"`, `"required"`, ...),
/// `selector` names the controlling elements in jQuery style
/// (`:input[name="foo"]`), and `condition` is evaluated against each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDeclaration {
    pub state: String,
    pub selector: String,
    #[serde(default)]
    pub condition: ConditionSet,
}

impl StateDeclaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(
        state: impl Into<String>,
        selector: impl Into<String>,
        condition: ConditionSet,
    ) -> Self {
        Self {
            state: state.into(),
            selector: selector.into(),
            condition,
        }
    }
}
