//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the values it is handed
//! through `GenerationRequest`.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. Environment variables: `KELP__<SECTION>__<KEY>`, e.g. `KELP__INSTALL__SKIP=true`
//! 3. Config file: `--config FILE`, else the platform config directory
//! 4. Built-in defaults

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use kelp_core::{
    application::{DEFAULT_HOST_DIR, DEFAULT_INSTALL_COMMAND},
    domain::IdentityContext,
};
use serde::{Deserialize, Serialize};

/// Command users run to start a generated project.
pub const DEFAULT_RUN_COMMAND: &str = "nautus run";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Author details used in the manifest.
    pub identity: IdentityConfig,
    pub install: InstallConfig,
    pub host: HostConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub real_name: Option<String>,
    pub name: Option<String>,
    pub github_username: Option<String>,
    pub email: Option<String>,
}

impl From<&IdentityConfig> for IdentityContext {
    fn from(config: &IdentityConfig) -> Self {
        IdentityContext {
            real_name: config.real_name.clone(),
            github_username: config.github_username.clone(),
            name: config.name.clone(),
            email: config.email.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub command: String,
    pub skip: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_INSTALL_COMMAND.into(),
            skip: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Directory (inside the project) holding the host's scripts and metadata.
    pub metadata_dir: String,
    /// Shown in the success message.
    pub run_command: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            metadata_dir: DEFAULT_HOST_DIR.into(),
            run_command: DEFAULT_RUN_COMMAND.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// A file passed explicitly must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(config_file, Environment::with_prefix("KELP"))
    }

    fn load_with(config_file: Option<&PathBuf>, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to build default configuration")?;

        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(env.separator("__").try_parsing(true))
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.kelp.toml` in the
    /// current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kelp", "kelp")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kelp.toml"))
    }

    /// Identity to hand the generator.
    pub fn identity(&self) -> IdentityContext {
        IdentityContext::from(&self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("KELP").source(Some(map))
    }

    #[test]
    fn defaults_match_generator_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.install.command, "npm i typescript @types/node -D");
        assert_eq!(cfg.host.metadata_dir, "nautus");
        assert_eq!(cfg.host.run_command, "nautus run");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let missing = PathBuf::from("/definitely/not/here/kelp.toml");
        let cfg = AppConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(cfg.install.command, DEFAULT_INSTALL_COMMAND);
        assert!(AppConfig::load_with(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kelp.toml");
        std::fs::write(
            &path,
            "[install]\nskip = true\n\n[identity]\ngithub_username = \"octocat\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_with(Some(&path), env(&[])).unwrap();
        assert!(cfg.install.skip);
        assert_eq!(cfg.install.command, DEFAULT_INSTALL_COMMAND);
        assert_eq!(cfg.identity().github_username(), Some("octocat"));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kelp.toml");
        std::fs::write(&path, "[host]\nrun_command = \"npm start\"\n").unwrap();

        let cfg = AppConfig::load_with(
            Some(&path),
            env(&[("KELP__HOST__RUN_COMMAND", "pnpm start")]),
        )
        .unwrap();
        assert_eq!(cfg.host.run_command, "pnpm start");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kelp.toml");
        std::fs::write(&path, "[install\nskip = ").unwrap();
        assert!(AppConfig::load_with(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
