//! Unified error handling for kelp core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for kelp core operations.
#[derive(Debug, Error, Clone)]
pub enum KelpError {
    /// Errors from the domain layer (rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and port failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KelpError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in kelp".into(),
                "Please report this issue at: https://github.com/cosecruz/kelp/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the user aborted the run.
    pub fn is_cancelled(&self) -> bool {
        self.category() == ErrorCategory::Cancelled
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Cancelled,
    Internal,
}

/// Convenient result type alias.
pub type KelpResult<T> = Result<T, KelpError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> KelpResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> KelpResult<T> {
        self.map_err(|e| KelpError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cancelled_prompt_is_reported_as_cancellation() {
        let err: KelpError = ApplicationError::PromptCancelled {
            reason: "interrupted".into(),
        }
        .into();
        assert!(err.is_cancelled());
        assert_eq!(err.category(), ErrorCategory::Cancelled);
    }

    #[test]
    fn unknown_script_is_configuration() {
        let err: KelpError = ApplicationError::UnknownScript {
            script: "Deploy".into(),
            path: PathBuf::from("nautus/@Deploy.js"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("Deploy")));
    }

    #[test]
    fn domain_categories_map_through() {
        let err: KelpError = DomainError::InvalidAnswer {
            field: "license",
            value: "x".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = result.context("writing report").unwrap_err();
        assert!(matches!(err, KelpError::Internal { ref message } if message.contains("boom")));
    }
}
