//! Script patcher over the host's `@<Name>.js` files.

use std::path::{Path, PathBuf};

use kelp_core::{
    application::{ApplicationError, ports::{Filesystem, ScriptPatcher}},
    domain::{HostScript, ScriptName},
    error::KelpResult,
};
use tracing::{debug, instrument};

/// Edits host scripts in `scripts_dir` (usually `<project>/<host dir>`).
///
/// Each call reads the script, edits it in memory and writes it back, so
/// successive merges accumulate in call order.
#[derive(Debug, Clone)]
pub struct FileScriptPatcher<F> {
    scripts_dir: PathBuf,
    fs: F,
}

impl<F: Filesystem> FileScriptPatcher<F> {
    pub fn new(scripts_dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            fs,
        }
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    /// On-disk location of `script`.
    pub fn path_of(&self, script: &ScriptName) -> PathBuf {
        self.scripts_dir.join(script.file_name())
    }

    fn load(&self, script: &ScriptName) -> KelpResult<(PathBuf, HostScript)> {
        let path = self.path_of(script);
        if !self.fs.exists(&path) || self.fs.is_dir(&path) {
            return Err(ApplicationError::UnknownScript {
                script: script.to_string(),
                path,
            }
            .into());
        }
        let source = self.fs.read_to_string(&path)?;
        Ok((path, HostScript::parse(script.clone(), &source)))
    }
}

impl<F: Filesystem> ScriptPatcher for FileScriptPatcher<F> {
    #[instrument(skip_all, fields(script = %script))]
    fn remove_default(&self, script: &ScriptName) -> KelpResult<bool> {
        let (path, mut host_script) = self.load(script)?;
        let removed = host_script.remove_default();
        if removed {
            self.fs.write_file(&path, &host_script.render())?;
            debug!("placeholder removed");
        } else {
            debug!("no placeholder left to remove");
        }
        Ok(removed)
    }

    #[instrument(skip_all, fields(script = %script, lines = code.lines().count()))]
    fn merge(&self, script: &ScriptName, code: &str) -> KelpResult<()> {
        let (path, mut host_script) = self.load(script)?;
        host_script.merge(code)?;
        self.fs.write_file(&path, &host_script.render())?;
        debug!("fragment merged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{LocalFilesystem, MemoryFilesystem};
    use kelp_core::domain::{DomainError, PLACEHOLDER_MARKER};
    use kelp_core::error::{ErrorCategory, KelpError};

    fn name(s: &str) -> ScriptName {
        ScriptName::new(s).unwrap()
    }

    fn seeded() -> (MemoryFilesystem, FileScriptPatcher<MemoryFilesystem>) {
        let fs = MemoryFilesystem::new().with_file(
            "/p/nautus/@Run.js",
            &HostScript::placeholder(name("Run")).render(),
        );
        let patcher = FileScriptPatcher::new("/p/nautus", fs.clone());
        (fs, patcher)
    }

    #[test]
    fn remove_then_merge_in_order() {
        let (fs, patcher) = seeded();
        let run = name("Run");

        assert!(patcher.remove_default(&run).unwrap());
        patcher.merge(&run, "first()").unwrap();
        patcher.merge(&run, "second()").unwrap();

        let source = fs.read_file("/p/nautus/@Run.js").unwrap();
        assert!(!source.contains(PLACEHOLDER_MARKER));
        let first = source.find("first()").unwrap();
        let second = source.find("second()").unwrap();
        assert!(first < second);
    }

    #[test]
    fn remove_default_twice_is_harmless() {
        let (fs, patcher) = seeded();
        let run = name("Run");

        assert!(patcher.remove_default(&run).unwrap());
        let once = fs.read_file("/p/nautus/@Run.js").unwrap();
        assert!(!patcher.remove_default(&run).unwrap());
        assert_eq!(fs.read_file("/p/nautus/@Run.js").unwrap(), once);
    }

    #[test]
    fn unknown_script_is_configuration_error() {
        let (_, patcher) = seeded();
        let err = patcher.merge(&name("Deploy"), "x()").unwrap_err();

        assert!(matches!(
            err,
            KelpError::Application(ApplicationError::UnknownScript { ref script, .. }) if script == "Deploy"
        ));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn malformed_script_is_reported() {
        let fs = MemoryFilesystem::new().with_file("/p/nautus/@Build.js", "no handler here\n");
        let patcher = FileScriptPatcher::new("/p/nautus", fs);

        let err = patcher.merge(&name("Build"), "x()").unwrap_err();
        assert!(matches!(
            err,
            KelpError::Domain(DomainError::MalformedScript { .. })
        ));
    }

    #[test]
    fn works_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("nautus");
        std::fs::create_dir_all(&scripts).unwrap();
        std::fs::write(
            scripts.join("@Build.js"),
            HostScript::placeholder(name("Build")).render(),
        )
        .unwrap();

        let patcher = FileScriptPatcher::new(&scripts, LocalFilesystem);
        patcher.remove_default(&name("Build")).unwrap();
        patcher.merge(&name("Build"), "await build()").unwrap();

        let source = std::fs::read_to_string(scripts.join("@Build.js")).unwrap();
        assert!(source.contains("    await build()"));
        assert!(source.ends_with("}\n"));
    }
}
