//! Error types for swimlane operations.
//!
//! This module provides the main error type [`SwimlaneError`] which wraps
//! the error conditions of every stage between reading a document and
//! writing the laid out result.

use std::io;

use thiserror::Error;

use swimlane_core::ModelError;

use crate::layout::{ErrorCategory, LayoutError};

/// The main error type for swimlane operations.
#[derive(Debug, Error)]
pub enum SwimlaneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Invalid process model: {0}")]
    Model(#[from] ModelError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SwimlaneError {
    /// Returns the layout failure class, if this is a layout error.
    ///
    /// Model errors raised while reading a document count as integrity
    /// failures.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            SwimlaneError::Layout(err) => Some(err.category()),
            SwimlaneError::Model(_) => Some(ErrorCategory::Integrity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use swimlane_core::identifier::Id;

    use super::*;

    #[test]
    fn test_layout_error_keeps_category() {
        let err = SwimlaneError::from(LayoutError::UnassignedTask {
            task: "Register".to_string(),
        });

        assert_eq!(err.category(), Some(ErrorCategory::Assignment));
        assert_eq!(
            err.to_string(),
            "Layout failed: task `Register` has no role assignment"
        );
    }

    #[test]
    fn test_model_error_is_integrity() {
        let err = SwimlaneError::from(ModelError::DuplicateId(Id::new("t1")));
        assert_eq!(err.category(), Some(ErrorCategory::Integrity));
    }

    #[test]
    fn test_config_error_has_no_category() {
        let err = SwimlaneError::Config("bad".to_string());
        assert_eq!(err.category(), None);
    }
}
