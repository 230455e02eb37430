//! Batch driver: run the file updater over every selected file.
//!
//! Files are processed one at a time in selection order. A failure on one
//! file is handed to the caller's callback and counted; it never stops the
//! remaining files.

use crate::transform::Pipeline;
use crate::update::{update_file, FileOutcome, UpdateError, UpdateOptions};
use std::path::{Path, PathBuf};

/// Counts accumulated over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files attempted
    pub total: usize,
    /// Files whose text changed
    pub changed: usize,
    /// Files that could not be read or written
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, result: &Result<FileOutcome, UpdateError>) {
        self.total += 1;
        match result {
            Ok(outcome) if outcome.is_changed() => self.changed += 1,
            Ok(_) => {}
            Err(_) => self.failed += 1,
        }
    }
}

/// Update each file in `files`, invoking `report` after each one.
pub fn run_batch<F>(
    files: &[PathBuf],
    pipeline: &Pipeline,
    options: UpdateOptions,
    mut report: F,
) -> BatchSummary
where
    F: FnMut(&Path, &Result<FileOutcome, UpdateError>),
{
    let mut summary = BatchSummary::default();

    for file in files {
        let result = update_file(file, pipeline, options);
        summary.record(&result);
        report(file, &result);
    }

    summary
}
