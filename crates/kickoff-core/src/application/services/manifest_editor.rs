//! Read-mutate-write editing of the project manifest.

use std::path::Path;

use tracing::debug;

use crate::application::ports::Filesystem;
use crate::domain::Manifest;
use crate::error::KickoffResult;

/// Applies targeted mutations to a manifest file on disk.
///
/// The file is read through the `Filesystem` port, parsed into the ordered
/// [`Manifest`] document, mutated, and written back with `put_file` in the
/// stable pretty format. A missing file or invalid JSON propagates an error;
/// callers wrap the edit in the step runner so such failures degrade to a
/// printed warning rather than aborting the run.
pub struct ManifestEditor<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> ManifestEditor<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Load, mutate, and rewrite the manifest at `path`.
    pub fn update(
        &self,
        path: &Path,
        mutate: impl FnOnce(&mut Manifest),
    ) -> KickoffResult<()> {
        let text = self.filesystem.read_file(path)?;
        let mut manifest = Manifest::parse(&text)?;

        mutate(&mut manifest);

        debug!(path = %path.display(), "rewriting manifest");
        self.filesystem.put_file(path, &manifest.to_pretty_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::output::MockFilesystem;
    use crate::domain::DomainError;
    use crate::error::KickoffError;

    #[test]
    fn update_reads_mutates_and_writes_back() {
        let mut fs = MockFilesystem::new();
        let path = PathBuf::from("/proj/composer.json");

        fs.expect_read_file()
            .withf(|p| p == Path::new("/proj/composer.json"))
            .times(1)
            .returning(|_| Ok(r#"{ "name": "acme/demo" }"#.to_string()));

        fs.expect_put_file()
            .withf(|p, content| {
                p == Path::new("/proj/composer.json")
                    && content.contains(r#""acme/demo""#)
                    && content.contains(r#""support/helpers.php""#)
                    && content.ends_with('\n')
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let editor = ManifestEditor::new(&fs);
        editor
            .update(&path, |m| m.set_autoload_files(&["support/helpers.php"]))
            .unwrap();
    }

    #[test]
    fn invalid_json_propagates_without_writing() {
        let mut fs = MockFilesystem::new();

        fs.expect_read_file().returning(|_| Ok("{ nope".to_string()));
        fs.expect_put_file().times(0);

        let editor = ManifestEditor::new(&fs);
        let err = editor
            .update(Path::new("/proj/composer.json"), |_| {})
            .unwrap_err();

        assert!(matches!(
            err,
            KickoffError::Domain(DomainError::ManifestParse { .. })
        ));
    }

    #[test]
    fn missing_file_propagates_read_error() {
        let mut fs = MockFilesystem::new();

        fs.expect_read_file().returning(|p| {
            Err(crate::application::SetupError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Failed to read file: not found".into(),
            }
            .into())
        });
        fs.expect_put_file().times(0);

        let editor = ManifestEditor::new(&fs);
        assert!(
            editor
                .update(Path::new("/proj/composer.json"), |_| {})
                .is_err()
        );
    }
}
