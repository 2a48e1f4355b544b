//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what generation needs from the host. The
//! `kelp-adapters` crate provides implementations.

mod prompt;

use std::path::Path;

use crate::domain::{PatchStep, ScriptName};
use crate::error::KelpResult;

pub use prompt::{NumberValidator, SelectionBounds, TextPrompt, TextValidator, ToggleSide};

/// Port for raw filesystem operations.
///
/// Implemented by:
/// - `kelp_adapters::filesystem::LocalFilesystem` (production)
/// - `kelp_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Generation never calls this directly; every write goes through
/// `ProtectedFs`, which adds confinement and overwrite confirmation.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KelpResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> KelpResult<()>;

    /// Append content to a file, creating it if absent.
    fn append_file(&self, path: &Path, content: &str) -> KelpResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> KelpResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for interactive questions.
///
/// Implemented by:
/// - `kelp_cli::prompt::TerminalPrompter` (interactive, dialoguer)
/// - `kelp_adapters::prompt::ScriptedPrompter` (preset answers, testing)
///
/// A user abort must surface as `ApplicationError::PromptCancelled`.
pub trait Prompter: Send + Sync {
    /// Ask until `prompt.resolve` accepts the answer.
    fn text(&self, prompt: &TextPrompt) -> KelpResult<String>;

    /// Yes/no question.
    fn confirm(&self, question: &str) -> KelpResult<bool>;

    /// Choose one of exactly two options.
    fn toggle(&self, question: &str, options: [&str; 2]) -> KelpResult<ToggleSide>;

    /// Ask for a number until `validator` accepts it.
    fn numeral(&self, question: &str, validator: &NumberValidator) -> KelpResult<f64>;

    /// Choose one of `choices`; returns its index.
    fn select(&self, question: &str, choices: &[&str]) -> KelpResult<usize>;

    /// Choose several of `choices` within `bounds`; returns their indices in
    /// ascending order.
    fn multi_select(
        &self,
        question: &str,
        choices: &[&str],
        bounds: SelectionBounds,
    ) -> KelpResult<Vec<usize>>;

    /// Ask before replacing an existing file.
    fn confirm_overwrite(&self, path: &Path) -> KelpResult<bool> {
        self.confirm(&format!("{} already exists. Overwrite?", path.display()))
    }
}

/// Exit status and captured stdout of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Port for running shell commands inside the project directory.
///
/// Implemented by:
/// - `kelp_adapters::command::ShellRunner` (production)
/// - `kelp_adapters::command::RecordingRunner` (testing)
///
/// `Err` means the command could not be started; a command that ran and
/// failed is `Ok` with a non-zero `exit_code`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> KelpResult<CommandOutput>;
}

/// Port for editing the host's named automation scripts.
///
/// Implemented by:
/// - `kelp_adapters::scripts::FileScriptPatcher`
///
/// Unknown script names are `ApplicationError::UnknownScript`.
pub trait ScriptPatcher: Send + Sync {
    /// Remove the placeholder statement. Returns `false` if it was already gone.
    fn remove_default(&self, script: &ScriptName) -> KelpResult<bool>;

    /// Append `code` to the script's handler body.
    fn merge(&self, script: &ScriptName, code: &str) -> KelpResult<()>;

    /// Apply one step of a patch plan.
    fn apply(&self, step: &PatchStep) -> KelpResult<()> {
        match step {
            PatchStep::RemoveDefault(script) => self.remove_default(script).map(|_| ()),
            PatchStep::Merge(patch) => self.merge(&patch.script, &patch.code),
        }
    }
}
