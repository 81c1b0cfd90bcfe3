//! Condition and group evaluation.
//!
//! Evaluation is pure: it reads the element's live value and checked-ness and
//! returns a boolean. Nothing here fails; unsupported conditions evaluate to
//! `false`.
//!
//! | condition | holds when |
//! |-----------|------------|
//! | `checked` | checked-ness equals the asserted boolean |
//! | `unchecked` | element is not checked (operand ignored) |
//! | `empty` | `value == ""` (operand ignored) |
//! | `filled` | `value != ""` (operand ignored) |
//! | `value` | checkable: value matches and element is checked; else exact match |
//! | output-only names, unknown names | never |

use std::rc::Weak;

use wform_core::{Condition, ConditionSet, ConditionValue};

use crate::document::{ControllingElement, ElementHandle};

fn check(element: &dyn ControllingElement, condition: &Condition, operand: &ConditionValue) -> bool {
    match condition {
        Condition::Checked => element.is_checked() == operand.asserted(),
        Condition::Unchecked => !element.is_checked(),
        Condition::Empty => element.value().is_empty(),
        Condition::Filled => !element.value().is_empty(),
        Condition::Value => {
            let Some(expected) = operand.as_text() else {
                return false;
            };
            if element.is_checkable() {
                element.value() == expected && element.is_checked()
            } else {
                element.value() == expected
            }
        }
        // Output-only states: not derivable from a single element's value.
        Condition::Disabled
        | Condition::Enabled
        | Condition::Required
        | Condition::Collapsed
        | Condition::Expanded
        | Condition::Visible
        | Condition::Invisible => false,
        Condition::Other(name) => {
            tracing::trace!(condition = %name, "unrecognized condition");
            false
        }
    }
}

/// Whether `element` satisfies every asserted condition in `conditions`.
///
/// Entries with a `null` operand are skipped; an empty set holds.
#[must_use]
pub fn evaluate(element: &dyn ControllingElement, conditions: &ConditionSet) -> bool {
    conditions
        .asserted()
        .all(|(condition, operand)| check(element, condition, operand))
}

/// Whether at least one element of the group satisfies `conditions`.
///
/// An empty group never holds.
#[must_use]
pub fn evaluate_group(elements: &[ElementHandle], conditions: &ConditionSet) -> bool {
    elements
        .iter()
        .any(|element| evaluate(element.as_ref(), conditions))
}

/// [`evaluate_group`] over weakly held members; dropped members are skipped.
pub(crate) fn evaluate_weak_group(
    elements: &[Weak<dyn ControllingElement>],
    conditions: &ConditionSet,
) -> bool {
    elements
        .iter()
        .filter_map(Weak::upgrade)
        .any(|element| evaluate(element.as_ref(), conditions))
}
