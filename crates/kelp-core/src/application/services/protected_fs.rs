//! Overwrite-guarded file writes, rooted at the project directory.
//!
//! Every file generation touches goes through here. Paths are validated as
//! [`ProjectPath`]s before any I/O happens.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    application::{
        ApplicationError, WriteOutcome,
        ports::{Filesystem, Prompter},
    },
    domain::ProjectPath,
    error::KelpResult,
};

pub struct ProtectedFs<'a> {
    root: PathBuf,
    fs: &'a dyn Filesystem,
    prompter: &'a dyn Prompter,
}

impl<'a> ProtectedFs<'a> {
    pub fn new(root: impl Into<PathBuf>, fs: &'a dyn Filesystem, prompter: &'a dyn Prompter) -> Self {
        Self {
            root: root.into(),
            fs,
            prompter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content`, asking before replacing an existing file.
    ///
    /// A refusal leaves the file untouched and yields [`WriteOutcome::Skipped`].
    /// Existing content identical to `content` is left alone without asking.
    pub fn write(&self, path: impl Into<PathBuf>, content: &str) -> KelpResult<WriteOutcome> {
        let (rel, full) = self.resolve(path)?;

        if !self.fs.exists(&full) {
            self.ensure_parent(&full)?;
            self.fs.write_file(&full, content)?;
            debug!(path = %rel, "created");
            return Ok(WriteOutcome::Created);
        }

        self.reject_dir(&full)?;

        // Unreadable (e.g. binary) content counts as different.
        if self.fs.read_to_string(&full).is_ok_and(|existing| existing == content) {
            debug!(path = %rel, "content already up to date");
            return Ok(WriteOutcome::Unchanged);
        }

        if self.prompter.confirm_overwrite(rel.as_path())? {
            self.fs.write_file(&full, content)?;
            debug!(path = %rel, "overwritten");
            Ok(WriteOutcome::Overwritten)
        } else {
            warn!(path = %rel, "Overwrite declined, keeping existing file");
            Ok(WriteOutcome::Skipped)
        }
    }

    /// Create an empty file if nothing exists at `path`.
    pub fn ensure_file(&self, path: impl Into<PathBuf>) -> KelpResult<WriteOutcome> {
        let (rel, full) = self.resolve(path)?;

        if self.fs.exists(&full) {
            self.reject_dir(&full)?;
            return Ok(WriteOutcome::Unchanged);
        }

        self.ensure_parent(&full)?;
        self.fs.write_file(&full, "")?;
        debug!(path = %rel, "created empty file");
        Ok(WriteOutcome::Created)
    }

    /// Create a directory and its parents if absent.
    pub fn ensure_dir(&self, path: impl Into<PathBuf>) -> KelpResult<WriteOutcome> {
        let (rel, full) = self.resolve(path)?;

        if self.fs.is_dir(&full) {
            return Ok(WriteOutcome::Unchanged);
        }
        if self.fs.exists(&full) {
            return Err(ApplicationError::FilesystemError {
                path: full,
                reason: "a file exists where a directory is expected".into(),
            }
            .into());
        }

        self.fs.create_dir_all(&full)?;
        debug!(path = %rel, "created directory");
        Ok(WriteOutcome::Created)
    }

    /// Append `content` starting on a new line, creating the file first if
    /// needed. Never asks.
    pub fn append(&self, path: impl Into<PathBuf>, content: &str) -> KelpResult<WriteOutcome> {
        let (rel, full) = self.resolve(path)?;

        let mut unterminated = false;
        if self.fs.exists(&full) {
            self.reject_dir(&full)?;
            let existing = self.fs.read_to_string(&full)?;
            unterminated = !existing.is_empty() && !existing.ends_with('\n');
        } else {
            self.ensure_parent(&full)?;
        }

        if unterminated {
            self.fs.append_file(&full, &format!("\n{content}"))?;
        } else {
            self.fs.append_file(&full, content)?;
        }
        debug!(path = %rel, bytes = content.len(), "appended");
        Ok(WriteOutcome::Appended)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve(&self, path: impl Into<PathBuf>) -> KelpResult<(ProjectPath, PathBuf)> {
        let rel = ProjectPath::try_new(path)?;
        let full = rel.under(&self.root);
        Ok((rel, full))
    }

    fn ensure_parent(&self, full: &Path) -> KelpResult<()> {
        match full.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.fs.is_dir(parent) => {
                self.fs.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }

    fn reject_dir(&self, full: &Path) -> KelpResult<()> {
        if self.fs.is_dir(full) {
            return Err(ApplicationError::FilesystemError {
                path: full.to_path_buf(),
                reason: "is a directory".into(),
            }
            .into());
        }
        Ok(())
    }
}
