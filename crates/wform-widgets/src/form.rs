//! The form model: one state engine per element, rendering, submission.

use std::collections::BTreeMap;
use std::rc::Rc;

use ahash::AHashMap;
use serde_json::{Map, Value};
use wform_core::mapping::REQUIRED;
use wform_core::{AttrValue, FormConfig, StateMapping, Webform, WebformElement};
use wform_runtime::{Document, EnginePhase, StatesError};

use crate::elements::Builtin;
use crate::error::SubmitError;
use crate::markup::{Markup, Tag};
use crate::states::ElementStates;
use crate::submit::{
    FormStatus, SubmitHooks, SubmitOutcome, SubmitPhase, SubmitTransport, build_payload,
    collapse_single_checkboxes, form_to_json, server_errors,
};
use crate::{ElementRenderer, RenderContext, apply_states};

/// A webform bound to a document.
///
/// The form owns one [`ElementStates`] per schema element. Call
/// [`attach`](Self::attach) once the document holds the rendered controls;
/// until then every element shows its guessed state.
pub struct Form {
    webform: Webform,
    config: FormConfig,
    document: Rc<dyn Document>,
    elements: Vec<ElementStates>,
    renderers: AHashMap<String, Box<dyn ElementRenderer>>,
    errors: BTreeMap<String, String>,
    status: FormStatus,
    hooks: SubmitHooks,
    attached: bool,
}

impl Form {
    #[must_use]
    pub fn new(document: Rc<dyn Document>, webform: Webform, config: FormConfig) -> Self {
        let elements = webform
            .elements
            .iter()
            .map(|e| ElementStates::new(Rc::clone(&document), e))
            .collect();
        Self {
            webform,
            config,
            document,
            elements,
            renderers: AHashMap::new(),
            errors: BTreeMap::new(),
            status: FormStatus::default(),
            hooks: SubmitHooks::default(),
            attached: false,
        }
    }

    /// Render elements of `kind` with `renderer` instead of the built-in one.
    #[must_use]
    pub fn with_renderer(mut self, kind: impl Into<String>, renderer: impl ElementRenderer + 'static) -> Self {
        self.renderers.insert(kind.into(), Box::new(renderer));
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: SubmitHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Compute every element's real state and start listening.
    ///
    /// Attaching an attached form does nothing. A detached form builds fresh
    /// engines and attaches those.
    pub fn attach(&mut self) -> Result<(), StatesError> {
        if self.attached {
            return Ok(());
        }
        for (states, element) in self.elements.iter_mut().zip(&self.webform.elements) {
            if states.engine().phase() == EnginePhase::TornDown {
                *states = ElementStates::new(Rc::clone(&self.document), element);
            }
            states.attach()?;
        }
        self.attached = true;
        Ok(())
    }

    /// Stop every engine.
    pub fn detach(&mut self) {
        for states in &mut self.elements {
            states.detach();
        }
        self.attached = false;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Replace the schema.
    ///
    /// Elements are matched by name. While attached, a surviving element
    /// keeps its engine, which re-attaches only if its declarations changed.
    /// Everything else gets a fresh engine, attached if the form is.
    pub fn set_webform(&mut self, webform: Webform) -> Result<(), StatesError> {
        let mut previous: AHashMap<String, ElementStates> = self
            .elements
            .drain(..)
            .map(|s| (s.name().to_owned(), s))
            .collect();

        let mut elements = Vec::with_capacity(webform.elements.len());
        for element in &webform.elements {
            let states = match previous.remove(&element.name) {
                Some(mut states) if self.attached => {
                    states.update(element);
                    states
                }
                _ => {
                    let mut states = ElementStates::new(Rc::clone(&self.document), element);
                    if self.attached {
                        states.attach()?;
                    }
                    states
                }
            };
            elements.push(states);
        }
        for states in previous.values_mut() {
            states.detach();
        }

        self.elements = elements;
        self.webform = webform;
        Ok(())
    }

    #[must_use]
    pub fn webform(&self) -> &Webform {
        &self.webform
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// State wiring of the element called `name`.
    #[must_use]
    pub fn states(&self, name: &str) -> Option<&ElementStates> {
        self.elements.iter().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.states(name).is_some_and(ElementStates::is_hidden)
    }

    /// Whether any element published new states since the last call.
    pub fn needs_render(&self) -> bool {
        // Every flag is consumed.
        self.elements
            .iter()
            .fold(false, |dirty, s| s.take_dirty() | dirty)
    }

    /// Field errors from the last submission.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    fn form_tag(&self) -> Tag {
        let mut classes: Vec<&str> = self.config.class_name.as_deref().into_iter().collect();
        classes.extend(self.status.classes());
        let class = (!classes.is_empty()).then(|| classes.join(" "));

        Tag::new("form")
            .attr_opt("id", self.config.id.as_deref())
            .attr_opt("class", class.as_deref())
            .flag("novalidate", self.config.no_validate)
            .attr("data-webform-id", self.webform.id.as_str())
    }

    /// Render the whole form.
    pub fn render(&self, out: &mut Markup) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("render_form", webform = %self.webform.id).entered();

        self.form_tag().open(out);
        for (element, states) in self.webform.elements.iter().zip(&self.elements) {
            let snapshot = states.current();
            let ctx = RenderContext {
                element,
                states: &snapshot,
                error: self.errors.get(&element.name).map(String::as_str),
                submit_label: &self.config.submit_label,
            };
            match self.renderers.get(&element.kind) {
                Some(renderer) => renderer.render(&ctx, out),
                None => Builtin.render(&ctx, out),
            }
        }
        if !self.webform.has_actions() {
            let actions = WebformElement::new("actions", "", "webform_actions");
            let snapshot = StateMapping::new();
            let mut ctx = RenderContext::new(&actions, &snapshot);
            ctx.submit_label = &self.config.submit_label;
            Builtin.render(&ctx, out);
        }
        out.close("form");
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let mut out = Markup::new();
        self.render(&mut out);
        out.into_string()
    }

    /// Values of every visible element, as they would be submitted.
    #[must_use]
    pub fn collect(&self) -> Map<String, Value> {
        let mut data = form_to_json(self.document.as_ref(), &self.webform);
        for states in self.elements.iter().filter(|s| s.is_hidden()) {
            data.remove(states.name());
        }
        collapse_single_checkboxes(&mut data, &self.webform);
        data
    }

    /// Required elements that are visible and have no value.
    fn missing_required(&self, data: &Map<String, Value>) -> Vec<String> {
        self.webform
            .elements
            .iter()
            .zip(&self.elements)
            .filter(|(_, states)| !states.is_hidden())
            .filter(|(element, states)| {
                let mut attributes = wform_core::denormalize(element, None).attributes;
                apply_states(&mut attributes, &states.current());
                attributes.get(REQUIRED).is_some_and(AttrValue::is_true)
            })
            .filter(|(element, _)| match data.get(&element.name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(Value::Array(values)) => values.is_empty(),
                Some(_) => false,
            })
            .map(|(element, _)| element.name.clone())
            .collect()
    }

    fn fail(&mut self, err: SubmitError) -> Result<SubmitOutcome, SubmitError> {
        self.status.finish(SubmitPhase::Error);
        #[cfg(feature = "tracing")]
        tracing::debug!(webform = %self.webform.id, error = %err, "submission failed");
        self.hooks.error(&err);
        Err(err)
    }

    /// Validate, collect, and POST the form to the configured endpoint.
    pub fn submit(&mut self, transport: &dyn SubmitTransport) -> Result<SubmitOutcome, SubmitError> {
        self.errors.clear();
        self.status.reset();

        let data = self.collect();
        if !self.hooks.validate(&data) {
            self.status.validated(SubmitPhase::Error);
            return self.fail(SubmitError::Invalid { fields: Vec::new() });
        }
        if !self.config.no_validate {
            let fields = self.missing_required(&data);
            if !fields.is_empty() {
                self.status.validated(SubmitPhase::Error);
                return self.fail(SubmitError::Invalid { fields });
            }
        }

        self.status.validated(SubmitPhase::Submitting);
        if !self.hooks.proceed(&data) {
            self.status.finish(SubmitPhase::Submitted);
            return Ok(SubmitOutcome::Skipped);
        }

        let payload = build_payload(&self.config.extra_data, data, &self.webform.id);
        #[cfg(feature = "tracing")]
        tracing::debug!(webform = %self.webform.id, endpoint = %self.config.endpoint, "submitting");

        match transport.post(&self.config.endpoint, &payload) {
            Ok(response) => match server_errors(&response) {
                Some(errors) => {
                    self.errors.clone_from(&errors);
                    self.fail(SubmitError::Rejected { errors })
                }
                None => {
                    self.status.finish(SubmitPhase::Submitted);
                    self.hooks.success(&response);
                    Ok(SubmitOutcome::Submitted(response))
                }
            },
            Err(err) => {
                if let Some(errors) = err.body.as_ref().and_then(server_errors) {
                    self.errors = errors;
                }
                self.fail(err.into())
            }
        }
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("webform", &self.webform.id)
            .field("elements", &self.elements)
            .field("renderers", &self.renderers.keys().collect::<Vec<_>>())
            .field("status", &self.status)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use serde_json::json;
    use wform_harness::fixtures::{contact_form, toggle_form};
    use wform_harness::{MemoryDocument, mounted};

    use crate::submit::TransportError;

    fn attached_contact() -> (Rc<MemoryDocument>, Form) {
        let webform = contact_form().unwrap();
        let doc = mounted(&webform);
        let mut form = Form::new(doc.clone(), webform, FormConfig::new("/submit"));
        form.attach().unwrap();
        (doc, form)
    }

    fn accept(_: &str, _: &Value) -> Result<Value, TransportError> {
        Ok(json!({"sid": 7}))
    }

    #[test]
    fn guessed_before_attach() {
        let webform = contact_form().unwrap();
        let doc = mounted(&webform);
        let form = Form::new(doc, webform, FormConfig::default());
        assert!(form.is_hidden("extra"));
        // `visible` is guessed false until computed.
        assert!(form.is_hidden("blue_note"));
        assert!(!form.is_hidden("name"));
        assert!(!form.is_hidden("no_such_element"));
    }

    #[test]
    fn attach_computes_and_marks_dirty() {
        let (doc, form) = attached_contact();
        assert!(form.is_hidden("extra"));
        assert!(form.is_hidden("blue_note"));
        assert!(form.needs_render());
        assert!(!form.needs_render());

        doc.click(&doc.by_name("color")[2]);
        assert!(!form.is_hidden("blue_note"));
        assert!(form.needs_render());
    }

    #[test]
    fn render_skips_hidden_and_adds_submit() {
        let webform = toggle_form();
        let doc = mounted(&webform);
        let mut config = FormConfig::default();
        config.id = Some("f".into());
        config.class_name = Some("webform".into());
        config.no_validate = true;
        let mut form = Form::new(doc.clone(), webform, config);
        form.attach().unwrap();

        let html = form.render_html();
        assert!(html.starts_with(r#"<form id="f" class="webform" novalidate data-webform-id="toggle">"#));
        assert!(!html.contains(r#"name="extra""#));
        assert!(html.ends_with(r#"<div class="form-group"><button type="submit">Submit</button></div></form>"#));

        doc.click(&doc.first_by_name("show_extra").unwrap());
        assert!(form.render_html().contains(r#"name="extra""#));
    }

    #[test]
    fn custom_renderer_replaces_builtin() {
        let webform = toggle_form();
        let doc = mounted(&webform);
        let form = Form::new(doc, webform, FormConfig::default()).with_renderer(
            "checkbox",
            |ctx: &RenderContext<'_>, out: &mut Markup| {
                Tag::new("x-toggle").text(out, &ctx.element.title);
            },
        );
        assert!(form.render_html().contains("<x-toggle>Show extra</x-toggle>"));
    }

    #[test]
    fn collect_drops_hidden_and_collapses() {
        let (doc, form) = attached_contact();
        doc.type_text(&doc.first_by_name("extra").unwrap(), "ignored");
        doc.click(&doc.first_by_name("contact_me").unwrap());

        let data = form.collect();
        assert!(!data.contains_key("extra"));
        assert!(!data.contains_key("blue_note"));
        assert_eq!(data["contact_me"], json!("1"));
    }

    #[test]
    fn required_state_blocks_submission() {
        let (doc, mut form) = attached_contact();
        doc.click(&doc.first_by_name("contact_me").unwrap());

        let err = form.submit(&accept).unwrap_err();
        assert_eq!(err, SubmitError::Invalid { fields: vec!["email".into()] });
        assert_eq!(form.status().classes(), ["was-validated", "form-error"]);
        assert!(form.render_html().contains(r#"class="was-validated form-error""#));

        doc.type_text(&doc.first_by_name("email").unwrap(), "a@b.c");
        assert!(matches!(form.submit(&accept), Ok(SubmitOutcome::Submitted(_))));
        assert_eq!(form.status().phase(), SubmitPhase::Submitted);
    }

    #[test]
    fn payload_carries_extra_data_and_id() {
        let webform = contact_form().unwrap();
        let doc = mounted(&webform);
        let mut config = FormConfig::new("/hook");
        config.extra_data.insert("source".into(), json!("site"));
        let mut form = Form::new(doc.clone(), webform, config);
        form.attach().unwrap();
        doc.type_text(&doc.first_by_name("name").unwrap(), "Ada");

        let seen = RefCell::new(None);
        let transport = |endpoint: &str, payload: &Value| -> Result<Value, TransportError> {
            *seen.borrow_mut() = Some((endpoint.to_owned(), payload.clone()));
            Ok(json!({}))
        };
        form.submit(&transport).unwrap();

        let (endpoint, payload) = seen.into_inner().unwrap();
        assert_eq!(endpoint, "/hook");
        assert_eq!(payload["source"], json!("site"));
        assert_eq!(payload["name"], json!("Ada"));
        assert_eq!(payload["webform_id"], json!("contact"));
    }

    #[test]
    fn rejected_errors_render_on_elements() {
        let (_doc, mut form) = attached_contact();
        let reject = |_: &str, _: &Value| -> Result<Value, TransportError> {
            Ok(json!({"error": {"name": "Too short"}}))
        };
        let err = form.submit(&reject).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { .. }));
        assert_eq!(form.errors()["name"], "Too short");

        let html = form.render_html();
        assert!(html.contains(r#"<div class="form-group is-invalid">"#));
        assert!(html.contains(r#"<div class="form-text invalid-feedback">Too short</div>"#));

        form.submit(&accept).unwrap();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn transport_error_body_fills_errors() {
        let (_doc, mut form) = attached_contact();
        let fail = |_: &str, _: &Value| -> Result<Value, TransportError> {
            Err(TransportError::new("bad request").with_response(400, json!({"error": {"email": "Invalid"}})))
        };
        let err = form.submit(&fail).unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(form.errors()["email"], "Invalid");
    }

    #[test]
    fn hooks_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let webform = toggle_form();
        let doc = mounted(&webform);
        let hooks = {
            let (a, b, c) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
            SubmitHooks::new()
                .on_validate(move |_| {
                    a.borrow_mut().push("validate");
                    true
                })
                .on_submit(move |_| {
                    b.borrow_mut().push("submit");
                    true
                })
                .on_success(move |_| c.borrow_mut().push("success"))
        };
        let mut form = Form::new(doc, webform, FormConfig::default()).with_hooks(hooks);
        form.submit(&accept).unwrap();
        assert_eq!(*log.borrow(), ["validate", "submit", "success"]);
    }

    #[test]
    fn on_submit_false_skips_transport() {
        let webform = toggle_form();
        let doc = mounted(&webform);
        let mut form = Form::new(doc, webform, FormConfig::default())
            .with_hooks(SubmitHooks::new().on_submit(|_| false));
        let never = |_: &str, _: &Value| -> Result<Value, TransportError> {
            Err(TransportError::new("should not be called"))
        };
        assert_eq!(form.submit(&never), Ok(SubmitOutcome::Skipped));
        assert_eq!(form.status().phase(), SubmitPhase::Submitted);
    }

    #[test]
    fn validate_hook_veto() {
        let webform = toggle_form();
        let doc = mounted(&webform);
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&errors);
        let hooks = SubmitHooks::new()
            .on_validate(|_| false)
            .on_error(move |e| sink.borrow_mut().push(e.to_string()));
        let mut form = Form::new(doc, webform, FormConfig::default()).with_hooks(hooks);
        assert_eq!(form.submit(&accept), Err(SubmitError::Invalid { fields: vec![] }));
        assert_eq!(*errors.borrow(), ["form failed validation"]);
    }

    #[test]
    fn set_webform_keeps_matching_engines() {
        let webform = toggle_form();
        let doc = mounted(&webform);
        let mut form = Form::new(doc.clone(), webform.clone(), FormConfig::default());
        form.attach().unwrap();
        let before = Rc::clone(form.states("extra").unwrap().engine().declarations());

        let mut next = webform.clone();
        next.elements.push(WebformElement::new("late", "Late", "textfield"));
        form.set_webform(next).unwrap();
        let after = form.states("extra").unwrap().engine().declarations();
        assert!(Rc::ptr_eq(&before, after));
        assert_eq!(form.states("late").unwrap().engine().phase(), EnginePhase::Computed);

        let mut fewer = webform;
        fewer.elements.truncate(1);
        form.set_webform(fewer).unwrap();
        assert!(form.states("extra").is_none());
        assert_eq!(doc.first_by_name("show_extra").unwrap().listener_count(), 0);
    }

    #[test]
    fn detach_then_attach_rebuilds() {
        let webform = toggle_form();
        let doc = mounted(&webform);
        let show = doc.first_by_name("show_extra").unwrap();
        let mut form = Form::new(doc.clone(), webform, FormConfig::default());
        form.attach().unwrap();
        form.detach();
        assert_eq!(show.listener_count(), 0);
        form.attach().unwrap();
        assert_eq!(show.listener_count(), 1);
        drop(form);
        assert_eq!(show.listener_count(), 0);
    }
}
