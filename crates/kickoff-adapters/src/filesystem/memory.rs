//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use kickoff_core::{
    application::{SetupError, ports::Filesystem},
    error::KickoffResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating parent directories (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: &str) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        inner.files.insert(path, content.to_string());
    }

    /// Read a file's content without going through the port (testing helper).
    pub fn file_content(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.executables.contains(path)
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }
}

impl Filesystem for MemoryFilesystem {
    fn ensure_dir(&self, path: &Path) -> KickoffResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn ensure_file(&self, path: &Path, content: &str) -> KickoffResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;
        if inner.files.contains_key(path) {
            return Ok(());
        }
        check_parent(&inner, path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn put_file(&self, path: &Path, content: &str) -> KickoffResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;
        check_parent(&inner, path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> KickoffResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;

        let copies: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(path, content)| {
                path.strip_prefix(src)
                    .ok()
                    .map(|rel| (dst.join(rel), content.clone()))
            })
            .collect();
        let executables: Vec<PathBuf> = inner
            .executables
            .iter()
            .filter_map(|path| path.strip_prefix(src).ok().map(|rel| dst.join(rel)))
            .collect();

        for (path, content) in copies {
            if let Some(parent) = path.parent() {
                let mut current = PathBuf::new();
                for component in parent.components() {
                    current.push(component);
                    inner.directories.insert(current.clone());
                }
            }
            inner.files.insert(path, content);
        }
        for path in executables {
            inner.executables.insert(path);
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> KickoffResult<String> {
        let inner = self.inner.read().map_err(lock_error)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            SetupError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read file: not found".into(),
            }
            .into()
        })
    }

    fn read_dir(&self, path: &Path) -> KickoffResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(lock_error)?;
        if !inner.directories.contains(path) {
            return Err(SetupError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read directory: not found".into(),
            }
            .into());
        }

        let mut files: Vec<_> = inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn set_executable(&self, path: &Path) -> KickoffResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;
        inner.executables.insert(path.to_path_buf());
        Ok(())
    }
}

fn check_parent(inner: &MemoryFilesystemInner, path: &Path) -> KickoffResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
            return Err(SetupError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }
    }
    Ok(())
}

fn lock_error<T>(_: T) -> kickoff_core::error::KickoffError {
    kickoff_core::error::KickoffError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_file_is_idempotent() {
        let fs = MemoryFilesystem::new();
        fs.ensure_dir(Path::new("/proj")).unwrap();

        fs.ensure_file(Path::new("/proj/a.txt"), "first").unwrap();
        fs.ensure_file(Path::new("/proj/a.txt"), "second").unwrap();

        assert_eq!(
            fs.file_content(Path::new("/proj/a.txt")).unwrap(),
            "first"
        );
    }

    #[test]
    fn put_file_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.put_file(Path::new("/no/parent.txt"), "x").is_err());
    }

    #[test]
    fn copy_tree_rewrites_prefixes_and_keeps_exec_flags() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/stubs/bin/install", "#!/bin/sh\n");
        fs.seed_file("/stubs/README.md", "readme");
        fs.set_executable(Path::new("/stubs/bin/install")).unwrap();
        fs.ensure_dir(Path::new("/proj")).unwrap();

        fs.copy_tree(Path::new("/stubs"), Path::new("/proj")).unwrap();

        assert_eq!(
            fs.file_content(Path::new("/proj/bin/install")).unwrap(),
            "#!/bin/sh\n"
        );
        assert!(fs.is_executable(Path::new("/proj/bin/install")));
        assert_eq!(fs.file_content(Path::new("/proj/README.md")).unwrap(), "readme");
    }

    #[test]
    fn read_dir_returns_direct_children_only() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/proj/bin/a", "");
        fs.seed_file("/proj/bin/b", "");
        fs.seed_file("/proj/bin/nested/c", "");

        let files = fs.read_dir(Path::new("/proj/bin")).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("/proj/bin/a"), PathBuf::from("/proj/bin/b")]
        );
    }
}
