//! The stub payload - the static tree of files copied into every project.
//!
//! The tool never inspects stub contents beyond the token-substitution pass;
//! the tree is opaque payload. A `StubTree` is the in-memory form of that
//! payload; a `StubSource` says where a run's payload comes from.

use std::path::PathBuf;

/// One file in the stub payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFile {
    /// Path relative to the project root, always with `/` separators.
    pub path: &'static str,
    pub content: &'static str,
    /// Marked with the owner-exec bit after writing.
    pub executable: bool,
}

impl StubFile {
    pub const fn new(path: &'static str, content: &'static str) -> Self {
        Self {
            path,
            content,
            executable: false,
        }
    }

    pub const fn executable(path: &'static str, content: &'static str) -> Self {
        Self {
            path,
            content,
            executable: true,
        }
    }
}

/// The full payload shipped with the tool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StubTree {
    pub files: Vec<StubFile>,
}

impl StubTree {
    pub fn new(files: Vec<StubFile>) -> Self {
        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Where a run's stub payload comes from.
#[derive(Debug, Clone)]
pub enum StubSource {
    /// The payload compiled into the binary.
    Builtin(StubTree),
    /// A user-supplied directory, mirrored with `Filesystem::copy_tree`.
    Directory(PathBuf),
}

impl StubSource {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    /// Directory sources display their path; builtin sources a fixed label.
    pub fn describe(&self) -> String {
        match self {
            Self::Builtin(tree) => format!("builtin ({} files)", tree.len()),
            Self::Directory(path) => path.display().to_string(),
        }
    }
}
