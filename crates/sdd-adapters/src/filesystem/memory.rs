//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sdd_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SddResult,
};

/// In-memory filesystem for testing.
///
/// Cloning shares the same tree, so a test can hand one clone to a service
/// and inspect the other afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            let _ = self.create_dir_all(parent);
        }
        if let Ok(mut inner) = self.inner.write() {
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path.as_ref()))
            .unwrap_or(false)
    }

    fn read_lock(&self, path: &Path) -> SddResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error(path))
    }

    fn write_lock(&self, path: &Path) -> SddResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error(path))
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> SddResult<()> {
        let mut inner = self.write_lock(path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SddResult<()> {
        let mut inner = self.write_lock(path)?;
        ensure_parent(&inner, path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> SddResult<()> {
        let mut inner = self.write_lock(path)?;
        let file = inner.files.get_mut(path).ok_or_else(|| not_found(path))?;
        file.push_str(content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> SddResult<String> {
        let inner = self.read_lock(path)?;
        inner.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SddResult<()> {
        let mut inner = self.write_lock(to)?;
        let content = inner.files.get(from).cloned().ok_or_else(|| not_found(from))?;
        ensure_parent(&inner, to)?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SddResult<()> {
        let mut inner = self.write_lock(path)?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_empty_dir(&self, path: &Path) -> SddResult<bool> {
        let inner = self.read_lock(path)?;
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }
        let has_child = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .any(|p| p != path && p.starts_with(path));
        Ok(!has_child)
    }
}

fn ensure_parent(inner: &MemoryFilesystemInner, path: &Path) -> SddResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) => {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

fn not_found(path: &Path) -> sdd_core::error::SddError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file".into(),
    }
    .into()
}

fn lock_error(path: &Path) -> sdd_core::error::SddError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "In-memory filesystem lock poisoned".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());
        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file("/a/b.txt").as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new().with_file("/p/.gitignore", "node_modules\n");
        let other = fs.clone();
        other
            .append_file(Path::new("/p/.gitignore"), "# SDD DevFlow\n")
            .unwrap();
        assert_eq!(
            fs.read_file("/p/.gitignore").as_deref(),
            Some("node_modules\n# SDD DevFlow\n")
        );
    }

    #[test]
    fn empty_dir_tracks_children() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p")).unwrap();
        assert!(fs.is_empty_dir(Path::new("/p")).unwrap());
        fs.write_file(Path::new("/p/x"), "").unwrap();
        assert!(!fs.is_empty_dir(Path::new("/p")).unwrap());
        assert!(fs.is_empty_dir(Path::new("/missing")).is_err());
    }

    #[test]
    fn copy_preserves_content() {
        let fs = MemoryFilesystem::new().with_file("/p/openapi.yaml", "openapi: 3.0.0\n");
        fs.create_dir_all(Path::new("/p/docs/specs")).unwrap();
        fs.copy_file(
            Path::new("/p/openapi.yaml"),
            Path::new("/p/docs/specs/api-spec.yaml"),
        )
        .unwrap();
        assert_eq!(
            fs.read_file("/p/docs/specs/api-spec.yaml").as_deref(),
            Some("openapi: 3.0.0\n")
        );
    }
}
