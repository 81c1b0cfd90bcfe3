#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wform_core::{ConditionSet, StateDeclaration, StateMapping};
use wform_harness::{MemoryDocument, MemoryElement};
use wform_runtime::StateEngine;

const NAMES: [&str; 3] = ["a", "b", "c"];
const STATES: [&str; 4] = ["invisible", "visible", "required", "disabled"];
const CONDITIONS: [&str; 5] = ["checked", "unchecked", "empty", "filled", "value"];

#[derive(Debug, Arbitrary)]
struct Decl {
    state: u8,
    target: u8,
    condition: u8,
    asserted: bool,
    value: Option<String>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Toggle(u8),
    Type(u8, String),
    Remove(u8),
    Detach,
}

#[derive(Debug, Arbitrary)]
struct Input {
    decls: Vec<Decl>,
    ops: Vec<Op>,
}

fn pick<T: Copy>(items: &[T], i: u8) -> T {
    items[usize::from(i) % items.len()]
}

fuzz_target!(|input: Input| {
    let doc = MemoryDocument::new();
    let a = doc.append(MemoryElement::input("checkbox", "a"));
    let b = doc.append(MemoryElement::input("text", "b"));
    let c = doc.append(MemoryElement::input("radio", "c").attr("value", "x"));
    let controls = [a, b, c];

    let declarations: Rc<[StateDeclaration]> = input
        .decls
        .iter()
        .take(16)
        .map(|d| {
            let condition = pick(&CONDITIONS, d.condition);
            let conditions = match (&d.value, condition) {
                (Some(v), "value") => ConditionSet::new().with(condition, v.as_str()),
                _ => ConditionSet::new().with(condition, d.asserted),
            };
            StateDeclaration::new(
                pick(&STATES, d.state),
                format!(r#":input[name="{}"]"#, pick(&NAMES, d.target)),
                conditions,
            )
        })
        .collect();
    let guessed_keys: Vec<String> = declarations.iter().map(|d| d.state.clone()).collect();

    let mut engine = StateEngine::attached(doc.clone(), declarations);
    for op in input.ops.iter().take(64) {
        match op {
            Op::Toggle(i) => doc.click(&controls[usize::from(*i) % 3]),
            Op::Type(i, text) => doc.type_text(&controls[usize::from(*i) % 3], text),
            Op::Remove(i) => {
                doc.remove(&controls[usize::from(*i) % 3]);
            }
            Op::Detach => engine.detach(),
        }
        // Changes only rewrite keys that were declared.
        let current: StateMapping = engine.current();
        assert!(current.iter().all(|(k, _)| guessed_keys.iter().any(|g| g == k)));
    }
    engine.detach();
    assert_eq!(engine.listener_count(), 0);
    for control in &controls {
        assert_eq!(control.listener_count(), 0);
    }
});
