//! Single-file update.
//!
//! Reads one file, runs the pipeline over it and writes the result back in
//! place only when the text changed. Writes go through a sibling temp file so
//! a failure never leaves a half-written source behind.

use crate::rules::Rewrite;
use crate::transform::Pipeline;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// I/O failure while updating one file.
///
/// Recoverable: the batch reports it and moves on to the next file.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    pub fn path(&self) -> &Path {
        match self {
            UpdateError::Read { path, .. } | UpdateError::Write { path, .. } => path,
        }
    }
}

/// Per-run update settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Compute the rewrite but leave the file on disk untouched
    pub dry_run: bool,
}

/// Result of updating a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FileOutcome should be reported"]
pub enum FileOutcome {
    /// Text changed (and was written back unless this was a dry run)
    Changed {
        file: PathBuf,
        original: String,
        rewritten: String,
        applied: Vec<&'static str>,
        written: bool,
    },
    /// No rule matched; the file was not written
    Unchanged { file: PathBuf },
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, FileOutcome::Changed { .. })
    }

    pub fn file(&self) -> &Path {
        match self {
            FileOutcome::Changed { file, .. } | FileOutcome::Unchanged { file } => file,
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Changed {
                file,
                written: true,
                ..
            } => write!(f, "Rewrote: {}", file.display()),
            FileOutcome::Changed { file, .. } => write!(f, "Would rewrite: {}", file.display()),
            FileOutcome::Unchanged { file } => write!(f, "Unchanged: {}", file.display()),
        }
    }
}

/// Read `path`, run `pipeline` over it and write the result back if it changed.
pub fn update_file(
    path: &Path,
    pipeline: &Pipeline,
    options: UpdateOptions,
) -> Result<FileOutcome, UpdateError> {
    let original = fs::read_to_string(path).map_err(|source| UpdateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Rewrite {
        text,
        changed,
        applied,
    } = pipeline.apply(&original);

    if !changed {
        return Ok(FileOutcome::Unchanged {
            file: path.to_path_buf(),
        });
    }

    if !options.dry_run {
        atomic_write(path, text.as_bytes()).map_err(|source| UpdateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(FileOutcome::Changed {
        file: path.to_path_buf(),
        original,
        rewritten: text,
        applied,
        written: !options.dry_run,
    })
}

/// Atomic file write: tempfile in the same directory + fsync + rename.
///
/// The original file's permissions are carried over to the replacement.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)?.permissions();
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;

    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
