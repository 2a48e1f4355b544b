// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported and logged from several layers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("Invalid script name '{value}': {reason}")]
    InvalidScriptName { value: String, reason: String },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidAnswer { field: &'static str, value: String },

    // ========================================================================
    // Confinement Errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project directory: {path}")]
    PathOutsideProject { path: String },

    // ========================================================================
    // Host Script Errors
    // ========================================================================
    #[error("Host script '{script}' is malformed: {reason}")]
    MalformedScript { script: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { value, .. } => vec![
                format!("'{}' is not a usable package name", value),
                "Allowed characters: a-z, A-Z, 0-9, '-', '_', '@', '~', '.', '/'".into(),
                "Pass --identifier or fix the host's project.json".into(),
            ],
            Self::InvalidScriptName { .. } => vec![
                "Script names are bare words like 'Build', 'Prep' or 'Run'".into(),
                "Do not include '@' or the '.js' extension".into(),
            ],
            Self::InvalidAnswer { field, .. } => {
                vec![format!("Re-run the generator and check the {} answer", field)]
            }
            Self::AbsolutePathNotAllowed { path } | Self::PathOutsideProject { path } => vec![
                format!("Refusing to touch {} outside the project directory", path),
                "This is a bug in the generator, please report it".into(),
            ],
            Self::MalformedScript { script, .. } => vec![
                format!("Check that @{}.js still ends its handler with a closing brace", script),
                "Restore the host's default script and run the generator again".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAnswer { .. } => ErrorCategory::Validation,
            Self::InvalidIdentifier { .. }
            | Self::InvalidScriptName { .. }
            | Self::MalformedScript { .. } => ErrorCategory::Configuration,
            Self::AbsolutePathNotAllowed { .. } | Self::PathOutsideProject { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
