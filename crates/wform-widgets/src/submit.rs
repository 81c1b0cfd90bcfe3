//! Submission: value collection, payload shaping, transport, status.
//!
//! ```text
//! collect ─► validate ─► on_submit ─► payload ─► transport ─► status
//!              │ fail       │ false                  │ error
//!              ▼            ▼                        ▼
//!          form-error   form-submitted           form-error
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;
use wform_core::{Webform, WebformElement};
use wform_runtime::{ControllingElement, Document};

use crate::error::SubmitError;

/// Element types that render no control and carry no value.
const VALUELESS_KINDS: &[&str] = &["processed_text", "webform_actions"];

fn name_selector(name: &str) -> String {
    format!("[name=\"{name}\"]")
}

fn collect_element(document: &dyn Document, element: &WebformElement) -> Option<Value> {
    let controls = match document.query_selector_all(&name_selector(&element.name)) {
        Ok(controls) => controls,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(name = %element.name, error = %_err, "element not collectable");
            return None;
        }
    };
    let first = controls.first()?;

    match first.input_type().as_str() {
        "checkbox" => {
            let values: Vec<Value> = controls
                .iter()
                .filter(|c| c.is_checked())
                .map(|c| Value::String(c.value()))
                .collect();
            (!values.is_empty()).then_some(Value::Array(values))
        }
        "radio" => controls
            .iter()
            .find(|c| c.is_checked())
            .map(|c| Value::String(c.value())),
        _ => Some(Value::String(first.value())),
    }
}

/// Collect the current value of every schema element from `document`.
///
/// Checkboxes produce an array of checked values and are omitted when none is
/// checked; radios produce the checked value; everything else its value.
#[must_use]
pub fn form_to_json(document: &dyn Document, webform: &Webform) -> Map<String, Value> {
    webform
        .elements
        .iter()
        .filter(|e| !VALUELESS_KINDS.contains(&e.kind.as_str()))
        .filter_map(|e| collect_element(document, e).map(|v| (e.name.clone(), v)))
        .collect()
}

/// A single `checkbox` element submits its first value, not an array.
pub fn collapse_single_checkboxes(data: &mut Map<String, Value>, webform: &Webform) {
    for element in webform.elements.iter().filter(|e| e.kind == "checkbox") {
        if let Some(slot) = data.get_mut(&element.name)
            && let Value::Array(values) = slot
            && let Some(first) = values.first().cloned()
        {
            *slot = first;
        }
    }
}

/// `extra ∪ data ∪ {webform_id}`, later entries winning.
#[must_use]
pub fn build_payload(extra: &Map<String, Value>, data: Map<String, Value>, webform_id: &str) -> Value {
    let mut payload = extra.clone();
    payload.extend(data);
    payload.insert("webform_id".to_owned(), Value::String(webform_id.to_owned()));
    Value::Object(payload)
}

/// Field errors in a server response body (`{"error": {name: message}}`).
///
/// Returns `None` when the body reports no error. A truthy non-object error
/// yields an empty map.
#[must_use]
pub fn server_errors(body: &Value) -> Option<BTreeMap<String, String>> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Object(fields) => Some(
            fields
                .iter()
                .map(|(name, message)| {
                    let message = match message {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (name.clone(), message)
                })
                .collect(),
        ),
        _ => Some(BTreeMap::new()),
    }
}

/// A failed POST.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}{}", status_suffix(.status))]
pub struct TransportError {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    pub message: String,
    /// Decoded response body, when there was one.
    pub body: Option<Value>,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_response(mut self, status: u16, body: Value) -> Self {
        self.status = Some(status);
        self.body = Some(body);
        self
    }
}

/// POSTs a JSON payload to an endpoint and returns the decoded response body.
pub trait SubmitTransport {
    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, TransportError>;
}

impl<F> SubmitTransport for F
where
    F: Fn(&str, &Value) -> Result<Value, TransportError>,
{
    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, TransportError> {
        self(endpoint, payload)
    }
}

/// Where the last submission got to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Error,
}

impl SubmitPhase {
    /// CSS class conveying this phase.
    #[must_use]
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Submitting => Some("form-submitting"),
            Self::Submitted => Some("form-submitted"),
            Self::Error => Some("form-error"),
        }
    }
}

/// Form-level status exposed to CSS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormStatus {
    validated: bool,
    phase: SubmitPhase,
}

impl FormStatus {
    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    #[must_use]
    pub fn was_validated(&self) -> bool {
        self.validated
    }

    /// Forget the phase of the previous submission. `was-validated` stays.
    pub fn reset(&mut self) {
        self.phase = SubmitPhase::Idle;
    }

    pub(crate) fn validated(&mut self, phase: SubmitPhase) {
        self.validated = true;
        self.phase = phase;
    }

    pub(crate) fn finish(&mut self, phase: SubmitPhase) {
        self.phase = phase;
    }

    /// Classes to put on the `<form>`.
    #[must_use]
    pub fn classes(&self) -> Vec<&'static str> {
        self.validated
            .then_some("was-validated")
            .into_iter()
            .chain(self.phase.class())
            .collect()
    }
}

/// What a successful [`Form::submit`](crate::Form::submit) did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Sent; carries the server response.
    Submitted(Value),
    /// `on_submit` returned `false`; nothing was sent.
    Skipped,
}

type DataHook = Box<dyn Fn(&Map<String, Value>) -> bool>;

/// Callbacks around a submission. All optional.
#[derive(Default)]
pub struct SubmitHooks {
    /// Veto before anything is sent. `false` fails validation.
    pub on_validate: Option<DataHook>,
    /// Called with the collected data. `false` skips the transport.
    pub on_submit: Option<DataHook>,
    pub on_success: Option<Box<dyn Fn(&Value)>>,
    pub on_error: Option<Box<dyn Fn(&SubmitError)>>,
}

impl SubmitHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_validate(mut self, f: impl Fn(&Map<String, Value>) -> bool + 'static) -> Self {
        self.on_validate = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_submit(mut self, f: impl Fn(&Map<String, Value>) -> bool + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&Value) + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&SubmitError) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub(crate) fn validate(&self, data: &Map<String, Value>) -> bool {
        self.on_validate.as_ref().is_none_or(|f| f(data))
    }

    pub(crate) fn proceed(&self, data: &Map<String, Value>) -> bool {
        self.on_submit.as_ref().is_none_or(|f| f(data))
    }

    pub(crate) fn success(&self, response: &Value) {
        if let Some(f) = &self.on_success {
            f(response);
        }
    }

    pub(crate) fn error(&self, err: &SubmitError) {
        if let Some(f) = &self.on_error {
            f(err);
        }
    }
}

impl std::fmt::Debug for SubmitHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitHooks")
            .field("on_validate", &self.on_validate.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wform_harness::fixtures::contact_form;
    use wform_harness::mounted;

    #[test]
    fn collects_each_control_kind() {
        let form = contact_form().unwrap();
        let doc = mounted(&form);
        doc.type_text(&doc.first_by_name("name").unwrap(), "Ada");
        doc.click(&doc.by_name("color")[2]);
        doc.click(&doc.first_by_name("show_extra").unwrap());

        let data = form_to_json(doc.as_ref(), &form);
        assert_eq!(data["name"], json!("Ada"));
        assert_eq!(data["color"], json!("blue"));
        assert_eq!(data["show_extra"], json!(["1"]));
        assert_eq!(data["reason"], json!(""));
        assert!(!data.contains_key("contact_me"));
        assert!(!data.contains_key("actions"));
    }

    #[test]
    fn no_radio_checked_means_no_key() {
        let form = contact_form().unwrap();
        let doc = mounted(&form);
        assert!(!form_to_json(doc.as_ref(), &form).contains_key("color"));
    }

    #[test]
    fn single_checkbox_collapses() {
        let form = contact_form().unwrap();
        let mut data = Map::new();
        data.insert("show_extra".into(), json!(["1"]));
        data.insert("name".into(), json!(["a", "b"]));
        collapse_single_checkboxes(&mut data, &form);
        assert_eq!(data["show_extra"], json!("1"));
        assert_eq!(data["name"], json!(["a", "b"]));
    }

    #[test]
    fn payload_precedence() {
        let extra = json!({"source": "site", "name": "extra", "webform_id": "spoofed"});
        let Value::Object(extra) = extra else { unreachable!() };
        let mut data = Map::new();
        data.insert("name".into(), json!("Ada"));
        assert_eq!(
            build_payload(&extra, data, "contact"),
            json!({"source": "site", "name": "Ada", "webform_id": "contact"})
        );
    }

    #[test]
    fn server_error_shapes() {
        assert_eq!(server_errors(&json!({"sid": 1})), None);
        assert_eq!(server_errors(&json!({"error": null})), None);
        assert_eq!(
            server_errors(&json!({"error": {"email": "Bad", "age": 3}})),
            Some(
                [("age".to_owned(), "3".to_owned()), ("email".to_owned(), "Bad".to_owned())]
                    .into_iter()
                    .collect()
            )
        );
        assert_eq!(server_errors(&json!({"error": "boom"})), Some(BTreeMap::new()));
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(TransportError::new("timed out").to_string(), "timed out");
        let err = TransportError::new("bad request").with_response(400, json!({}));
        assert_eq!(err.to_string(), "bad request (status 400)");
    }

    #[test]
    fn status_classes() {
        let mut status = FormStatus::default();
        assert!(status.classes().is_empty());
        status.validated(SubmitPhase::Submitting);
        assert_eq!(status.classes(), ["was-validated", "form-submitting"]);
        status.finish(SubmitPhase::Submitted);
        assert_eq!(status.classes(), ["was-validated", "form-submitted"]);
        status.reset();
        assert_eq!(status.classes(), ["was-validated"]);
    }

    #[test]
    fn closures_are_transports() {
        let transport = |endpoint: &str, payload: &Value| -> Result<Value, TransportError> {
            Ok(json!({"endpoint": endpoint, "echo": payload.clone()}))
        };
        let response = transport.post("/submit", &json!({"a": 1})).unwrap();
        assert_eq!(response["endpoint"], json!("/submit"));
    }
}
