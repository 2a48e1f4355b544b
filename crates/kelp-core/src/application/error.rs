//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the ports, not in
//! domain rules. Domain rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The host has no script by this name.
    #[error("Unknown host script '{script}' (expected {path})")]
    UnknownScript { script: String, path: PathBuf },

    /// The user aborted a prompt.
    #[error("Prompt cancelled: {reason}")]
    PromptCancelled { reason: String },

    /// An external command could not be started at all.
    #[error("Failed to run '{command}': {reason}")]
    CommandFailed { command: String, reason: String },

    /// Adapter state lock poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::UnknownScript { script, path } => vec![
                format!("The host does not define a '{}' script", script),
                format!("Expected to find {}", path.display()),
                "Run the generator from the root of a host-managed project".into(),
            ],
            Self::PromptCancelled { .. } => vec![
                "Generation was cancelled".into(),
                "Files written before cancelling were kept".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Could not start: {}", command),
                "Ensure the command is installed and in your PATH".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownScript { .. } => ErrorCategory::Configuration,
            Self::PromptCancelled { .. } => ErrorCategory::Cancelled,
            Self::FilesystemError { .. }
            | Self::CommandFailed { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
