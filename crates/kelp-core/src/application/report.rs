//! What a generation run did, returned to the caller when it finishes.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{EntryPoint, ProjectIdentifier, ScriptName};

/// Result of a single protected filesystem operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Path did not exist and was created.
    Created,
    /// Path existed and the user allowed replacing it.
    Overwritten,
    /// Path existed and the user refused; nothing was written.
    Skipped,
    /// Path already existed (or already held identical content).
    Unchanged,
    /// Content was appended.
    Appended,
}

impl WriteOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped",
            Self::Unchanged => "unchanged",
            Self::Appended => "appended",
        }
    }

    /// Whether the operation changed bytes on disk.
    pub const fn modified(&self) -> bool {
        matches!(self, Self::Created | Self::Overwritten | Self::Appended)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// How the dependency install went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallStatus {
    Skipped,
    Succeeded {
        command: String,
    },
    Failed {
        command: String,
        /// `None` when the command could not be started.
        exit_code: Option<i32>,
        reason: String,
    },
}

impl InstallStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    CollectAnswers,
    BuildManifest,
    WriteManifestFiles,
    RunDependencyInstall,
    WriteCompilerConfig,
    ScaffoldEntrySource,
    PatchScripts,
    AppendIgnoreRules,
    Report,
}

impl GenerationStage {
    pub const ALL: [Self; 9] = [
        Self::CollectAnswers,
        Self::BuildManifest,
        Self::WriteManifestFiles,
        Self::RunDependencyInstall,
        Self::WriteCompilerConfig,
        Self::ScaffoldEntrySource,
        Self::PatchScripts,
        Self::AppendIgnoreRules,
        Self::Report,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CollectAnswers => "collect answers",
            Self::BuildManifest => "build manifest",
            Self::WriteManifestFiles => "write manifest files",
            Self::RunDependencyInstall => "run dependency install",
            Self::WriteCompilerConfig => "write compiler config",
            Self::ScaffoldEntrySource => "scaffold entry source",
            Self::PatchScripts => "patch scripts",
            Self::AppendIgnoreRules => "append ignore rules",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the run scaffolds a new project or adds support to an existing one.
///
/// Both modes perform the same steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    #[default]
    Fresh,
    AddSupport,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fresh => "fresh",
            Self::AddSupport => "add-support",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub mode: GenerationMode,
    pub identifier: ProjectIdentifier,
    pub entry_point: EntryPoint,
    pub files: Vec<FileRecord>,
    pub patched_scripts: Vec<ScriptName>,
    pub install: InstallStatus,
    pub stages: Vec<GenerationStage>,
}

impl GenerationReport {
    pub(crate) fn new(mode: GenerationMode, identifier: ProjectIdentifier) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            mode,
            identifier,
            entry_point: EntryPoint::Main,
            files: Vec::new(),
            patched_scripts: Vec::new(),
            install: InstallStatus::Skipped,
            stages: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, path: impl Into<PathBuf>, outcome: WriteOutcome) {
        self.files.push(FileRecord {
            path: path.into(),
            outcome,
        });
    }

    /// Outcome recorded for `path`, if it was touched.
    pub fn outcome_of(&self, path: impl AsRef<std::path::Path>) -> Option<WriteOutcome> {
        let path = path.as_ref();
        self.files
            .iter()
            .rev()
            .find(|r| r.path == path)
            .map(|r| r.outcome)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileRecord> {
        self.files
            .iter()
            .filter(|r| r.outcome == WriteOutcome::Skipped)
    }

    /// Project-relative path of the generated entry source.
    pub fn entry_source(&self) -> String {
        format!("./src/{}", self.entry_point)
    }

    pub fn completed(&self, stage: GenerationStage) -> bool {
        self.stages.contains(&stage)
    }
}
