//! Layout of a host-managed project and its metadata file.

use std::path::{Path, PathBuf};

use kelp_core::{
    application::ports::Filesystem,
    domain::{ProjectIdentifier, ProjectPath},
    error::{KelpError, KelpResult},
};
use serde::Deserialize;
use tracing::debug;

/// `<host dir>/.internal/project.json`, written by the host when it creates a project.
#[derive(Debug, Deserialize)]
struct ProjectMetadata {
    identifier: String,
}

/// Where the host keeps its files inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLayout {
    project_dir: PathBuf,
    host_dir: ProjectPath,
}

impl HostLayout {
    /// The host dir must stay inside the project; anything else is a configuration error.
    pub fn new(project_dir: impl Into<PathBuf>, host_dir: &str) -> KelpResult<Self> {
        let host_dir = ProjectPath::try_new(host_dir).map_err(|e| KelpError::Configuration {
            message: format!("host directory '{host_dir}' is not inside the project: {e}"),
        })?;
        Ok(Self {
            project_dir: project_dir.into(),
            host_dir,
        })
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Directory holding the `@<Name>.js` scripts.
    pub fn scripts_dir(&self) -> PathBuf {
        self.host_dir.under(&self.project_dir)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.scripts_dir().join(".internal").join("project.json")
    }

    /// Read the project identifier the host recorded.
    pub fn read_identifier(&self, fs: &dyn Filesystem) -> KelpResult<ProjectIdentifier> {
        let path = self.metadata_path();
        if !fs.exists(&path) {
            return Err(KelpError::Configuration {
                message: format!(
                    "no host project metadata at {} (pass --identifier to set it explicitly)",
                    path.display()
                ),
            });
        }

        let json = fs.read_to_string(&path)?;
        let metadata: ProjectMetadata =
            serde_json::from_str(&json).map_err(|e| KelpError::Configuration {
                message: format!("invalid host project metadata {}: {e}", path.display()),
            })?;
        debug!(identifier = %metadata.identifier, "read host project metadata");

        Ok(ProjectIdentifier::parse(metadata.identifier)?)
    }
}
