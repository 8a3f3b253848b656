//! Collation of many word-count files into one cumulative tally.
//!
//! Low-level reading returns errors; this module is where they are caught.
//! By default a file that cannot be processed is reported and skipped, and
//! the remaining files are still collated. In strict mode the first failure
//! is returned to the caller instead.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zipf_core::messages::{render, Lang, MessageKey};
use zipf_core::models::WordCounts;
use zipf_core::{Result, ZipfError};

use crate::reader::{expand_inputs, parse_counts, validate_csv_suffix};

// ── CollateReport ─────────────────────────────────────────────────────────────

/// A file that was skipped, and why.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ZipfError,
}

/// Outcome of a collation run.
#[derive(Debug, Default)]
pub struct CollateReport {
    /// Per-word sums over every successfully processed file.
    pub counts: WordCounts,
    /// Files whose counts were included, in processing order.
    pub processed: Vec<PathBuf>,
    /// Files that were skipped.
    pub failures: Vec<FileFailure>,
}

impl CollateReport {
    /// Number of files that were attempted.
    pub fn total_files(&self) -> usize {
        self.processed.len() + self.failures.len()
    }
}

// ── Collator ──────────────────────────────────────────────────────────────────

/// Combines word-count CSV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collator {
    lang: Lang,
    strict: bool,
}

impl Collator {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            strict: false,
        }
    }

    /// Abort on the first file that cannot be processed.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate and read one file.
    ///
    /// Nothing is merged here, so a file that fails half-way contributes no
    /// counts at all.
    pub fn process_file(&self, path: &Path) -> Result<WordCounts> {
        debug!(
            "{}",
            render(
                self.lang,
                MessageKey::ReadingFile,
                &[("fname", path.display().to_string())]
            )
        );
        validate_csv_suffix(path)?;
        let file = std::fs::File::open(path).map_err(|e| ZipfError::from_io(path, e))?;
        debug!("{}", render(self.lang, MessageKey::ComputingCounts, &[]));
        parse_counts(file, path)
    }

    /// Collate every file in `inputs`; directories are expanded to the CSV
    /// files beneath them.
    pub fn collate(&self, inputs: &[PathBuf]) -> Result<CollateReport> {
        info!("{}", render(self.lang, MessageKey::ProcessingFiles, &[]));

        let files = expand_inputs(inputs);
        let mut report = CollateReport::default();

        for path in files {
            match self.process_file(&path) {
                Ok(counts) => {
                    report.counts.merge(counts)?;
                    report.processed.push(path);
                }
                Err(error) if self.strict => return Err(error),
                Err(error) => {
                    warn!(
                        "{}",
                        render(
                            self.lang,
                            MessageKey::NotProcessed,
                            &[
                                ("fname", path.display().to_string()),
                                ("reason", error.reason(self.lang)),
                            ],
                        )
                    );
                    report.failures.push(FileFailure { path, error });
                }
            }
        }

        if report.processed.is_empty() {
            warn!("{}", render(self.lang, MessageKey::NoFilesProcessed, &[]));
        }

        info!(
            "{}",
            render(
                self.lang,
                MessageKey::CollateSummary,
                &[
                    ("processed", report.processed.len().to_string()),
                    ("total", report.total_files().to_string()),
                    ("words", report.counts.len().to_string()),
                ],
            )
        );

        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
