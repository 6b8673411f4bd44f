//! Working copy of the docs source tree.
//!
//! Compilation rewrites demo sources in place, so it runs against a disposable
//! copy. The copy is removed when the [`StagedSource`] guard is cleaned up or
//! dropped, whichever comes first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that can occur while staging.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Docs directory not found: {0}")]
    SourceNotFound(String),

    #[error("Staging directory {work} overlaps docs directory {docs}")]
    Overlap { docs: String, work: String },

    #[error("Failed to stage {path}: {message}")]
    Io { path: String, message: String },
}

impl StageError {
    fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// A staged copy of the docs tree, removed on cleanup or drop.
#[derive(Debug)]
pub struct StagedSource {
    path: PathBuf,
    removed: bool,
}

impl StagedSource {
    /// Replace `work` with a fresh recursive copy of `source`.
    pub fn stage(source: &Path, work: &Path) -> Result<Self, StageError> {
        if !source.is_dir() {
            return Err(StageError::SourceNotFound(source.display().to_string()));
        }
        if work.starts_with(source) || source.starts_with(work) {
            return Err(StageError::Overlap {
                docs: source.display().to_string(),
                work: work.display().to_string(),
            });
        }

        match fs::remove_dir_all(work) {
            Ok(()) => tracing::debug!("Removed stale staging directory {}", work.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StageError::io(work, e)),
        }

        let staged = Self {
            path: work.to_path_buf(),
            removed: false,
        };
        // On a partial copy the guard drops here and removes what was written.
        copy_tree(source, work)?;

        tracing::debug!("Staged {} into {}", source.display(), work.display());
        Ok(staged)
    }

    /// Path of the working copy.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the working copy now.
    pub fn cleanup(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        match fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!("Removed staging directory {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove staging directory {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl Drop for StagedSource {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Recursively copy `source` into `target`.
fn copy_tree(source: &Path, target: &Path) -> Result<(), StageError> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| StageError::io(source, e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| StageError::io(entry.path(), e))?;
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| StageError::io(&dest, e))?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|e| StageError::io(&dest, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_tree(root: &Path) -> PathBuf {
        let docs = root.join("docs");
        fs::create_dir_all(docs.join("button/demo")).unwrap();
        fs::write(docs.join("button/index.md"), "# Button").unwrap();
        fs::write(docs.join("button/demo/basic.md"), "# Basic").unwrap();
        docs
    }

    #[test]
    fn copies_tree_recursively() {
        let temp = tempdir().unwrap();
        let docs = sample_tree(temp.path());
        let work = temp.path().join("docs-lang");

        let staged = StagedSource::stage(&docs, &work).unwrap();

        assert_eq!(staged.path(), work.as_path());
        assert_eq!(
            fs::read_to_string(work.join("button/demo/basic.md")).unwrap(),
            "# Basic"
        );
        assert!(work.join("button/index.md").is_file());
    }

    #[test]
    fn replaces_stale_working_copy() {
        let temp = tempdir().unwrap();
        let docs = sample_tree(temp.path());
        let work = temp.path().join("docs-lang");
        fs::create_dir_all(work.join("stale")).unwrap();
        fs::write(work.join("stale/old.md"), "old").unwrap();

        let _staged = StagedSource::stage(&docs, &work).unwrap();

        assert!(!work.join("stale").exists());
        assert!(work.join("button").is_dir());
    }

    #[test]
    fn removes_copy_on_cleanup_and_drop() {
        let temp = tempdir().unwrap();
        let docs = sample_tree(temp.path());
        let work = temp.path().join("docs-lang");

        let staged = StagedSource::stage(&docs, &work).unwrap();
        staged.cleanup();
        assert!(!work.exists());

        {
            let _staged = StagedSource::stage(&docs, &work).unwrap();
            assert!(work.exists());
        }
        assert!(!work.exists());
        assert!(docs.join("button/index.md").is_file());
    }

    #[test]
    fn rejects_missing_source() {
        let temp = tempdir().unwrap();

        let result = StagedSource::stage(&temp.path().join("nope"), &temp.path().join("work"));

        assert!(matches!(result, Err(StageError::SourceNotFound(_))));
    }

    #[test]
    fn rejects_overlapping_directories() {
        let temp = tempdir().unwrap();
        let docs = sample_tree(temp.path());

        let nested = StagedSource::stage(&docs, &docs.join("lang"));
        assert!(matches!(nested, Err(StageError::Overlap { .. })));

        let same = StagedSource::stage(&docs, &docs);
        assert!(matches!(same, Err(StageError::Overlap { .. })));
        assert!(docs.join("button/index.md").is_file());
    }

    #[test]
    fn overlap_error_names_both_directories() {
        let err = StageError::Overlap {
            docs: "docs".to_string(),
            work: "docs/lang".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Staging directory docs/lang overlaps docs directory docs"
        );
        assert!(std::error::Error::source(&err).is_none());
    }
}
