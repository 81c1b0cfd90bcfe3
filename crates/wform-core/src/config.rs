//! Form submission configuration.
//!
//! Configuration can be decoded from JSON and/or seeded from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `WFORM_ENDPOINT` | [`FormConfig::endpoint`] |
//! | `WFORM_SUBMIT_LABEL` | [`FormConfig::submit_label`] |
//!
//! Empty environment values are ignored.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Label of the submit button when the schema does not provide one.
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "WFORM_ENDPOINT";

/// Environment variable overriding the default submit label.
pub const SUBMIT_LABEL_ENV: &str = "WFORM_SUBMIT_LABEL";

/// Settings for rendering and submitting one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// POST endpoint receiving the submission.
    pub endpoint: String,
    /// Submit label used when the schema has no `webform_actions` label.
    pub submit_label: String,
    /// Extra fields merged into every submission (schema values win).
    pub extra_data: serde_json::Map<String, serde_json::Value>,
    /// `id` attribute of the rendered `<form>`.
    pub id: Option<String>,
    /// `class` attribute of the rendered `<form>`.
    pub class_name: Option<String>,
    /// Render `novalidate` on the form.
    pub no_validate: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            submit_label: DEFAULT_SUBMIT_LABEL.to_owned(),
            extra_data: serde_json::Map::new(),
            id: None,
            class_name: None,
            no_validate: false,
        }
    }
}

impl FormConfig {
    /// Create a config for `endpoint` with defaults for everything else.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Decode and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let endpoint = env::var(ENDPOINT_ENV).ok();
        let label = env::var(SUBMIT_LABEL_ENV).ok();
        Self::default().with_overrides(endpoint.as_deref(), label.as_deref())
    }

    /// Apply optional endpoint/label overrides. Empty values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, endpoint: Option<&str>, submit_label: Option<&str>) -> Self {
        if let Some(endpoint) = endpoint.filter(|s| !s.is_empty()) {
            tracing::debug!(endpoint, "endpoint override");
            self.endpoint = endpoint.to_owned();
        }
        if let Some(label) = submit_label.filter(|s| !s.is_empty()) {
            self.submit_label = label.to_owned();
        }
        self
    }

    /// Builder-style: add an extra field sent with every submission.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }

    /// Check that the config can be used for submission.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormConfig::default();
        assert_eq!(config.submit_label, "Submit");
        assert!(config.extra_data.is_empty());
        assert!(matches!(config.validate(), Err(ConfigError::MissingEndpoint)));
    }

    #[test]
    fn decode_partial_json() {
        let config =
            FormConfig::from_json(r#"{"endpoint": "/form-submit", "extra_data": {"lang": "fi"}}"#)
                .unwrap();
        assert_eq!(config.endpoint, "/form-submit");
        assert_eq!(config.submit_label, DEFAULT_SUBMIT_LABEL);
        assert_eq!(config.extra_data["lang"], "fi");
    }

    #[test]
    fn decode_rejects_blank_endpoint() {
        let err = FormConfig::from_json(r#"{"endpoint": "  "}"#).unwrap_err();
        assert_eq!(err.to_string(), "form config has no endpoint");
    }

    #[test]
    fn decode_rejects_bad_json() {
        let err = FormConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn overrides_ignore_empty_values() {
        let config = FormConfig::new("/a").with_overrides(Some(""), Some("Send"));
        assert_eq!(config.endpoint, "/a");
        assert_eq!(config.submit_label, "Send");

        let config = FormConfig::new("/a").with_overrides(Some("/b"), None);
        assert_eq!(config.endpoint, "/b");
        assert_eq!(config.submit_label, "Submit");
    }
}
