//! Runs commands through the platform shell.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use kelp_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::KelpResult,
};
use tracing::{debug, instrument};

/// Production command runner. Commands run in `working_dir`.
///
/// Stdout is captured and returned; stderr is captured and logged at debug
/// level so it does not interleave with prompts.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    working_dir: PathBuf,
}

impl ShellRunner {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    #[instrument(skip(self), fields(dir = %self.working_dir.display()))]
    fn run(&self, command: &str) -> KelpResult<CommandOutput> {
        let output = Self::shell(command)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "command stderr");
        }

        // Killed by a signal: no exit code.
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "command finished");

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new(dir.path());

        let ok = runner.run("echo hello").unwrap();
        assert!(ok.success());
        assert_eq!(ok.stdout.trim(), "hello");

        let failed = runner.run("exit 3").unwrap();
        assert_eq!(failed.exit_code, 3);
    }

    #[test]
    fn runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();

        let out = ShellRunner::new(dir.path()).run("ls").unwrap();
        assert!(out.stdout.contains("marker.txt"));
    }

    #[test]
    fn missing_working_dir_cannot_start() {
        let runner = ShellRunner::new("/definitely/not/here");
        let err = runner.run("echo hi").unwrap_err();
        assert!(err.to_string().contains("echo hi"));
    }
}
