//! Annotation commit: write the sidecar XML, then move the image.
//!
//! The XML is written and synced before the rename so an interrupted commit
//! leaves the image in the unlabeled root with an orphan annotation next to
//! the labeled images, never a moved image without its annotation. A failed
//! rename does not remove the XML.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use labeler_core::annotation::{annotation_file_name, AnnotationDocument, XML_HEADER};
use labeler_core::command::is_plain_filename;
use labeler_core::{LabelCommand, LabelError};

/// Where a committed image and its annotation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub image_path: PathBuf,
    pub annotation_path: PathBuf,
}

/// Commits label commands between the unlabeled and labeled roots.
#[derive(Debug, Clone)]
pub struct AnnotationWriter {
    unlabeled_root: PathBuf,
    labeled_root: PathBuf,
    /// Name of the unlabeled root, recorded as the document folder.
    folder: String,
}

impl AnnotationWriter {
    /// Resolve both roots to absolute paths.
    ///
    /// Fails with [`LabelError::InvalidRoot`] when either path is missing or
    /// is not a directory.
    pub fn new(
        unlabeled_root: impl AsRef<Path>,
        labeled_root: impl AsRef<Path>,
    ) -> Result<Self, LabelError> {
        let unlabeled_root = resolve_root("unlabeled", unlabeled_root.as_ref())?;
        let labeled_root = resolve_root("labeled", labeled_root.as_ref())?;

        let folder = unlabeled_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            unlabeled_root,
            labeled_root,
            folder,
        })
    }

    pub fn unlabeled_root(&self) -> &Path {
        &self.unlabeled_root
    }

    pub fn labeled_root(&self) -> &Path {
        &self.labeled_root
    }

    /// Validate `cmd`, write its annotation and move the image.
    ///
    /// All validation happens before the first filesystem mutation.
    pub fn commit(&self, cmd: &LabelCommand) -> Result<CommitOutcome, LabelError> {
        if cmd.filename.is_empty() {
            return Err(LabelError::EmptyFilename);
        }
        if !is_plain_filename(&cmd.filename) {
            return Err(LabelError::InvalidFilename(cmd.filename.clone()));
        }

        let source_path = self.unlabeled_root.join(&cmd.filename);
        if !source_path.is_file() {
            return Err(LabelError::MissingInputFile(source_path));
        }

        if cmd.trimmed_label().is_empty() {
            return Err(LabelError::EmptyLabel);
        }

        let document = AnnotationDocument::new(cmd, &self.folder, &source_path);
        let body = document.to_xml();

        let annotation_path = self.labeled_root.join(annotation_file_name(&cmd.filename));
        write_annotation(&annotation_path, &body)?;

        let image_path = self.labeled_root.join(&cmd.filename);
        fs::rename(&source_path, &image_path).map_err(|source| LabelError::MoveFailure {
            from: source_path.clone(),
            to: image_path.clone(),
            source,
        })?;

        Ok(CommitOutcome {
            image_path,
            annotation_path,
        })
    }
}

fn resolve_root(role: &'static str, path: &Path) -> Result<PathBuf, LabelError> {
    let invalid = || LabelError::InvalidRoot {
        role,
        path: path.to_path_buf(),
    };

    let resolved = fs::canonicalize(path).map_err(|_| invalid())?;
    if !resolved.is_dir() {
        return Err(invalid());
    }
    Ok(resolved)
}

/// Create (or truncate) `path`, write header and body, and sync to disk.
fn write_annotation(path: &Path, body: &str) -> Result<(), LabelError> {
    let write_failure = |source| LabelError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_failure)?;
    file.write_all(XML_HEADER.as_bytes()).map_err(write_failure)?;
    file.write_all(body.as_bytes()).map_err(write_failure)?;
    file.sync_all().map_err(write_failure)?;
    Ok(())
}
