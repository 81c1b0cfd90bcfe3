#![no_main]

use libfuzzer_sys::fuzz_target;
use wform_harness::{MemoryDocument, MemoryElement};
use wform_runtime::resolve;

fuzz_target!(|data: &[u8]| {
    let Ok(selector) = std::str::from_utf8(data) else {
        return;
    };

    let doc = MemoryDocument::new();
    doc.append(MemoryElement::input("checkbox", "a").attr("class", "x y"));
    doc.append(MemoryElement::new("select").attr("name", "b"));
    doc.append(MemoryElement::new("textarea").attr("name", selector));

    if let Ok(found) = doc.query(selector) {
        assert!(found.len() <= doc.len());
    }
    // Resolution never fails; bad selectors resolve to nothing.
    let _ = resolve(doc.as_ref(), selector);
});
