//! Infrastructure adapters for kelp.
//!
//! This crate implements the ports defined in `kelp_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod command;
pub mod filesystem;
pub mod host_project;
pub mod prompt;
pub mod scripts;

// Re-export commonly used adapters
pub use command::{RecordingRunner, ShellRunner};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use host_project::HostLayout;
pub use prompt::{OverwritePolicy, PresetAnswers, ScriptedAnswer, ScriptedPrompter};
pub use scripts::FileScriptPatcher;
