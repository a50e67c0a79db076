//! Error types for path parsing and form composition

use thiserror::Error;

/// Errors raised while parsing paths or composing a form.
///
/// None of these occur while rendering or handling input: a form that
/// composed successfully never fails afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("field path must not be empty")]
    EmptyPath,

    #[error("invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("path '{path}' is bound by more than one field")]
    DuplicatePath { path: String },

    #[error("radio group '{path}' declares no choices")]
    MissingChoices { path: String },

    #[error("select '{path}' declares no options")]
    MissingOptions { path: String },
}

impl FormError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        FormError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_message() {
        let err = FormError::invalid_path("a[", "unterminated bracket");
        assert_eq!(
            err.to_string(),
            "invalid field path 'a[': unterminated bracket"
        );
    }

    #[test]
    fn test_duplicate_path_message() {
        let err = FormError::DuplicatePath {
            path: "email".to_string(),
        };
        assert!(err.to_string().contains("email"));
    }
}
