//! Initial-state guess used for the first render.
//!
//! Before any controlling element can be inspected, assume `invisible`
//! declarations hide their element and every other state is off. The guess
//! only exists to avoid flicker; the engine replaces it as soon as it has
//! computed real values.

use wform_core::StateMapping;
use wform_core::StateDeclaration;
use wform_core::mapping::INVISIBLE;

/// Seed a mapping from declarations alone.
#[must_use]
pub fn guess_initial_state(declarations: &[StateDeclaration]) -> StateMapping {
    declarations
        .iter()
        .map(|decl| (decl.state.as_str(), decl.state == INVISIBLE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wform_core::ConditionSet;

    fn decl(state: &str) -> StateDeclaration {
        StateDeclaration::new(state, ":input", ConditionSet::new())
    }

    #[test]
    fn invisible_guessed_true() {
        let m = guess_initial_state(&[decl("invisible")]);
        assert_eq!(m.get("invisible"), Some(true));
        assert_eq!(m.len(), 1);
        assert!(m.is_hidden());
    }

    #[test]
    fn visible_guessed_false() {
        let m = guess_initial_state(&[decl("visible")]);
        assert_eq!(m.get("visible"), Some(false));
        assert!(m.is_hidden());
    }

    #[test]
    fn other_states_guessed_false() {
        let m = guess_initial_state(&[decl("required"), decl("disabled"), decl("checked")]);
        assert_eq!(m.get("required"), Some(false));
        assert_eq!(m.get("disabled"), Some(false));
        assert_eq!(m.get("checked"), Some(false));
        assert!(!m.is_hidden());
    }

    #[test]
    fn no_declarations_no_keys() {
        assert!(guess_initial_state(&[]).is_empty());
    }
}
