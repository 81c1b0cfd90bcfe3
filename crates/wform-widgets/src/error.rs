//! Submission errors.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::submit::TransportError;

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Validation failed before anything was sent. `fields` lists required
    /// elements left empty; it is empty when a validate hook vetoed.
    #[error("{}", invalid_message(.fields))]
    Invalid { fields: Vec<String> },
    /// The endpoint answered with field errors.
    #[error("submission rejected with {} field error(s)", .errors.len())]
    Rejected { errors: BTreeMap<String, String> },
    /// The transport failed.
    #[error("submission failed: {0}")]
    Transport(#[from] TransportError),
}

fn invalid_message(fields: &[String]) -> String {
    if fields.is_empty() {
        "form failed validation".to_owned()
    } else {
        format!("required fields are empty: {}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display() {
        assert_eq!(
            SubmitError::Invalid { fields: vec![] }.to_string(),
            "form failed validation"
        );
        assert_eq!(
            SubmitError::Invalid {
                fields: vec!["name".into(), "email".into()]
            }
            .to_string(),
            "required fields are empty: name, email"
        );
        let rejected = SubmitError::Rejected {
            errors: [("email".to_owned(), "Invalid".to_owned())].into_iter().collect(),
        };
        assert_eq!(rejected.to_string(), "submission rejected with 1 field error(s)");
    }

    #[test]
    fn transport_is_source() {
        let err = SubmitError::from(TransportError::new("connection refused"));
        assert_eq!(err.to_string(), "submission failed: connection refused");
        assert!(err.source().is_some());
    }
}
