//! Application layer for kelp.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, AnswerCollector, ProtectedFs)
//! - **Ports**: Interface definitions (traits) for the host's capabilities
//! - **Report**: What a run did, returned to the caller
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

// Re-export main services
pub use services::{
    AnswerCollector, DEFAULT_HOST_DIR, DEFAULT_INSTALL_COMMAND, GenerationRequest,
    GenerationService, Host, ProtectedFs,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutput, CommandRunner, Filesystem, Prompter, ScriptPatcher};

pub use report::{
    FileRecord, GenerationMode, GenerationReport, GenerationStage, InstallStatus, WriteOutcome,
};

pub use error::ApplicationError;
