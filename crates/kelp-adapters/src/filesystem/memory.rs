//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use kelp_core::{
    application::{ApplicationError, ports::Filesystem},
    error::KelpResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can keep a handle while the
/// generation service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn check_parent(&self, path: &Path) -> KelpResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }
        if self.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Is a directory".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.keys().cloned().collect()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> KelpResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "A file exists at this path".into(),
            }
            .into());
        }
        inner.add_dir_all(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> KelpResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.check_parent(path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> KelpResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.check_parent(path)?;
        inner
            .files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> KelpResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.create_dir_all(Path::new("/p/src")).unwrap();
        fs.write_file(Path::new("/p/src/main.ts"), "").unwrap();

        assert_eq!(handle.read_file("/p/src/main.ts").as_deref(), Some(""));
        assert!(handle.is_dir(Path::new("/p")));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/package.json"), "{}").is_err());
    }

    #[test]
    fn seeded_files_have_parents() {
        let fs = MemoryFilesystem::new().with_file("/p/nautus/@Run.js", "x");
        assert!(fs.is_dir(Path::new("/p/nautus")));
        fs.append_file(Path::new("/p/nautus/@Run.js"), "y").unwrap();
        assert_eq!(fs.read_file("/p/nautus/@Run.js").as_deref(), Some("xy"));
        assert_eq!(fs.list_files(), vec![PathBuf::from("/p/nautus/@Run.js")]);
    }
}
