//! Command runner that records instead of executing (testing).

use std::sync::{Arc, Mutex};

use kelp_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::KelpResult,
};

/// Records every command and answers with a fixed result.
///
/// Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    commands: Arc<Mutex<Vec<String>>>,
    exit_code: i32,
    unavailable: bool,
}

impl RecordingRunner {
    /// Every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command runs and exits with `code`.
    pub fn exiting_with(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::default()
        }
    }

    /// Every command fails to start.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str) -> KelpResult<CommandOutput> {
        self.commands
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(command.to_string());

        if self.unavailable {
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: "command not found".into(),
            }
            .into());
        }

        Ok(CommandOutput {
            exit_code: self.exit_code,
            stdout: String::new(),
        })
    }
}
