//! Unified error type for content operations.

use crate::content::ContentKind;
use crate::store::StoreError;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{kind} not found: {id}")]
    NotFound { kind: ContentKind, id: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown content kind: {0}")]
    UnknownKind(String),

    #[error("{kind} does not support {operation}")]
    Unsupported {
        kind: ContentKind,
        operation: &'static str,
    },
}

impl ContentError {
    pub fn not_found(kind: ContentKind, id: impl Into<String>) -> Self {
        ContentError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Lift a store error, turning a missing row into [`ContentError::NotFound`].
    #[must_use]
    pub fn from_store(kind: ContentKind, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => ContentError::NotFound { kind, id },
            other => ContentError::Store(other),
        }
    }
}

/// Stable machine-readable code for an error, with an optional hint.
pub trait ToErrorCode {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

impl ToErrorCode for ContentError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            ContentError::Validation(_) => ("VALIDATION_ERROR", None),
            ContentError::NotFound { .. } => (
                "NOT_FOUND",
                Some("The record may have been deleted; reload the list"),
            ),
            ContentError::Store(StoreError::AlreadyExists { .. }) => ("ALREADY_EXISTS", None),
            ContentError::Store(_) => ("STORE_ERROR", None),
            ContentError::UnknownKind(_) => ("UNKNOWN_KIND", None),
            ContentError::Unsupported { .. } => ("UNSUPPORTED_OPERATION", None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_maps_missing_row() {
        let err = ContentError::from_store(
            ContentKind::Statistic,
            StoreError::not_found("statistics", "abc"),
        );
        assert!(matches!(err, ContentError::NotFound { ref id, .. } if id == "abc"));
        assert_eq!(err.to_string(), "statistics not found: abc");
    }

    #[test]
    fn test_error_codes() {
        let err = ContentError::from(ValidationErrors::single("value", "must be positive"));
        assert_eq!(err.error_code_and_tip().0, "VALIDATION_ERROR");
        assert_eq!(
            err.to_string(),
            "Validation error: value: must be positive"
        );

        let err = ContentError::Store(StoreError::invalid_row("t", "bad"));
        assert_eq!(err.error_code_and_tip(), ("STORE_ERROR", None));
    }
}
