//! Errors surfaced by the document boundary and the state engine.
//!
//! None of these reach the renderer for malformed schema input: selector
//! errors are swallowed by the resolver and turned into an empty group. Only
//! contract violations by the caller are reported as [`StatesError`].

/// A document could not run a selector query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector is empty or only whitespace.
    Empty,
    /// The selector does not parse.
    Malformed { selector: String, reason: String },
    /// The selector parses but uses syntax the document does not support.
    Unsupported { selector: String, feature: String },
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::Malformed { selector, reason } => {
                write!(f, "malformed selector '{selector}': {reason}")
            }
            Self::Unsupported { selector, feature } => {
                write!(f, "unsupported selector '{selector}': {feature}")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

/// The state engine was driven out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatesError {
    /// `attach` was called while listeners from a previous attach are live.
    AlreadyAttached,
    /// The engine was torn down and cannot be attached again.
    TornDown,
}

impl std::fmt::Display for StatesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyAttached => write!(f, "state engine is already attached"),
            Self::TornDown => write!(f, "state engine has been torn down"),
        }
    }
}

impl std::error::Error for StatesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_error_display() {
        assert_eq!(SelectorError::Empty.to_string(), "empty selector");
        let err = SelectorError::Unsupported {
            selector: "input:checked".into(),
            feature: "pseudo-class".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported selector 'input:checked': pseudo-class"
        );
    }

    #[test]
    fn states_error_display() {
        assert_eq!(
            StatesError::AlreadyAttached.to_string(),
            "state engine is already attached"
        );
    }
}
