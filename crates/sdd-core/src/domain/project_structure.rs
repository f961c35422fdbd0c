use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// The files one materialization run intends to write, relative to `root`.
///
/// Pure data. Services plan a structure first, validate it, then hand each
/// entry to the filesystem port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        let executable = crate::domain::template::is_executable(&path);
        self.files.push(FileToWrite {
            path,
            content: FileContent::Text(content.into()),
            executable,
        });
    }

    /// Plan a byte-for-byte copy of an existing file.
    pub fn add_copy(&mut self, path: impl Into<String>, source: impl Into<PathBuf>) {
        self.files.push(FileToWrite {
            path: path.into(),
            content: FileContent::CopyFrom(source.into()),
            executable: false,
        });
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if Path::new(&file.path).is_absolute() || file.path.starts_with('/') {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: file.path.clone(),
                });
            }
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    /// Copy this file from the project being retrofitted.
    CopyFrom(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: String,
    pub content: FileContent,
    pub executable: bool,
}

impl FileToWrite {
    /// Absolute destination under `root`.
    pub fn destination(&self, root: &Path) -> PathBuf {
        self.path.split('/').fold(root.to_path_buf(), |acc, seg| acc.join(seg))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(t) => Some(t),
            FileContent::CopyFrom(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_scripts_are_marked_executable() {
        let s = ProjectStructure::new("/tmp/p")
            .with_file(".claude/hooks/quick-scan.sh", "#!/bin/sh\n")
            .with_file("AGENTS.md", "# Agents\n");
        let flags: Vec<bool> = s.files().map(|f| f.executable).collect();
        assert_eq!(flags, vec![true, false]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_paths() {
        let s = ProjectStructure::new("/tmp/p")
            .with_file("AGENTS.md", "a")
            .with_file("AGENTS.md", "b");
        assert_eq!(
            s.validate(),
            Err(DomainError::DuplicatePath {
                path: "AGENTS.md".into()
            })
        );
    }

    #[test]
    fn rejects_absolute_paths() {
        let s = ProjectStructure::new("/tmp/p").with_file("/etc/passwd", "");
        assert!(matches!(
            s.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn destination_joins_segments() {
        let s = ProjectStructure::new("/tmp/p").with_file("docs/tickets/.gitkeep", "");
        let file = s.files().next().unwrap();
        assert_eq!(
            file.destination(s.root()),
            PathBuf::from("/tmp/p/docs/tickets/.gitkeep")
        );
    }
}
