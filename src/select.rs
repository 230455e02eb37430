//! Resolve the command-line target to the list of files to rewrite.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("{} is not a valid file or directory", .0.display())]
    InvalidTarget(PathBuf),
}

/// Which files a directory walk picks up.
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Extension without the leading dot
    pub extension: String,
    /// Directory names pruned from the walk
    pub exclude_dirs: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            extension: "dart".to_string(),
            exclude_dirs: Vec::new(),
        }
    }
}

impl FileFilter {
    fn matches(&self, path: &Path) -> bool {
        path.extension().and_then(OsStr::to_str) == Some(self.extension.as_str())
    }

    fn is_excluded(&self, name: &OsStr) -> bool {
        name.to_str()
            .is_some_and(|name| self.exclude_dirs.iter().any(|d| d == name))
    }
}

/// Files resolved from one target.
#[derive(Debug, Default)]
pub struct Selection {
    /// Files to process, in walk order
    pub files: Vec<PathBuf>,
    /// Whether the target was a directory
    pub from_directory: bool,
    /// Entries the walk could not read; they are skipped
    pub walk_errors: Vec<walkdir::Error>,
}

/// Resolve `target` to the files to process.
///
/// A regular file is returned as-is, whatever its extension. A directory is
/// walked recursively in lexicographic order and yields every file with the
/// filter's extension.
pub fn select_files(target: &Path, filter: &FileFilter) -> Result<Selection, SelectError> {
    if target.is_file() {
        return Ok(Selection {
            files: vec![target.to_path_buf()],
            from_directory: false,
            walk_errors: Vec::new(),
        });
    }

    if !target.is_dir() {
        return Err(SelectError::InvalidTarget(target.to_path_buf()));
    }

    let mut selection = Selection {
        from_directory: true,
        ..Selection::default()
    };

    let walker = WalkDir::new(target)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !filter.is_excluded(entry.file_name())
        });

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && filter.matches(entry.path()) {
                    selection.files.push(entry.into_path());
                }
            }
            Err(err) => selection.walk_errors.push(err),
        }
    }

    Ok(selection)
}
