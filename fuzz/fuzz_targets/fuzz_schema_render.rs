#![no_main]

use libfuzzer_sys::fuzz_target;
use wform_core::{FormConfig, Webform};
use wform_harness::mounted;
use wform_widgets::Form;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(webform) = Webform::from_json(json) else {
        return;
    };

    let doc = mounted(&webform);
    let mut form = Form::new(doc.clone(), webform, FormConfig::default());
    let guessed = form.render_html();
    assert!(guessed.starts_with("<form"));

    if form.attach().is_ok() {
        let html = form.render_html();
        assert!(html.ends_with("</form>"));
        let _ = form.collect();
    }
    form.detach();
    for element in doc.elements() {
        assert_eq!(element.listener_count(), 0);
    }
});
