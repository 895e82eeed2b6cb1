//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use kickoff_core::{application::ports::Filesystem, error::KickoffResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn ensure_dir(&self, path: &Path) -> KickoffResult<()> {
        // create_dir_all succeeds on pre-existing directories.
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn ensure_file(&self, path: &Path, content: &str) -> KickoffResult<()> {
        if path.exists() {
            trace!(path = %path.display(), "ensure_file: already present, leaving untouched");
            return Ok(());
        }
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn put_file(&self, path: &Path, content: &str) -> KickoffResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> KickoffResult<()> {
        // Depth-first walk; walkdir yields a directory before its children,
        // so parents always exist by the time their files are copied.
        for entry in WalkDir::new(src) {
            let entry = entry.map_err(|e| {
                map_io_error(
                    src,
                    io::Error::other(e.to_string()),
                    "walk source tree",
                )
            })?;

            let rel = entry
                .path()
                .strip_prefix(src)
                .expect("walkdir yields paths under its root");
            if rel.as_os_str().is_empty() {
                continue;
            }
            let target = dst.join(rel);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else {
                // fs::copy also carries permissions, so executable stubs
                // stay executable.
                std::fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(&target, e, "copy file"))?;
            }
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> KickoffResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_dir(&self, path: &Path) -> KickoffResult<Vec<PathBuf>> {
        let entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            if entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn set_executable(&self, path: &Path) -> KickoffResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(mode | 0o111);
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = path;
        }
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> kickoff_core::error::KickoffError {
    use kickoff_core::application::SetupError;

    SetupError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
