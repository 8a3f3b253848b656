//! Word-count CSV discovery, validation and loading.
//!
//! A word-count file is a header-less, two-column CSV of `word,count` rows.
//! Files are validated by name before they are opened and by content while
//! they are read; the first problem found is returned as a [`ZipfError`].

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};
use zipf_core::models::WordCounts;
use zipf_core::{Result, ZipfError};

/// Required file-name suffix for word-count files.
pub const CSV_SUFFIX: &str = ".csv";

// ── Public API ────────────────────────────────────────────────────────────────

/// Fail with [`ZipfError::NotCsvSuffix`] unless the file name ends in `.csv`.
///
/// The check is on the name only and is case-sensitive.
pub fn validate_csv_suffix(path: &Path) -> Result<()> {
    if path.to_string_lossy().ends_with(CSV_SUFFIX) {
        Ok(())
    } else {
        Err(ZipfError::NotCsvSuffix(path.to_path_buf()))
    }
}

/// Find all `.csv` files recursively under `dir`, sorted by path.
pub fn find_csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Expand directories in `inputs` to the CSV files beneath them.
///
/// Anything that is not a directory is passed through untouched, so missing
/// files and wrong suffixes are still reported when the file is processed.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.is_dir() {
            let found = find_csv_files(input);
            debug!("{}: {} CSV files found", input.display(), found.len());
            out.extend(found);
        } else {
            out.push(input.clone());
        }
    }
    out
}

/// Validate and load a word-count CSV file.
pub fn read_counts(path: &Path) -> Result<WordCounts> {
    validate_csv_suffix(path)?;
    let file = std::fs::File::open(path).map_err(|e| ZipfError::from_io(path, e))?;
    parse_counts(file, path)
}

/// Parse word-count rows from `reader`.
///
/// `source` is only used to label errors. Every row must have exactly two
/// fields and the second must be a non-negative integer (surrounding
/// whitespace is allowed). Blank lines are skipped.
pub fn parse_counts<R: Read>(reader: R, source: &Path) -> Result<WordCounts> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut counts = WordCounts::new();
    let mut record = StringRecord::new();
    let mut rows = 0u64;

    loop {
        let more = csv_reader
            .read_record(&mut record)
            .map_err(|e| csv_error(source, e))?;
        if !more {
            break;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(rows + 1);
        if record.len() != 2 {
            return Err(ZipfError::MalformedRow {
                path: source.to_path_buf(),
                line,
                found: record.len(),
            });
        }

        let raw_count = &record[1];
        let count: u64 = raw_count
            .trim()
            .parse()
            .map_err(|_| ZipfError::InvalidCount {
                path: source.to_path_buf(),
                line,
                value: raw_count.to_string(),
            })?;

        counts.add(&record[0], count)?;
        rows += 1;
    }

    debug!(
        "File {}: {} rows, {} distinct words",
        source.display(),
        rows,
        counts.len()
    );

    Ok(counts)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Map a `csv` failure onto a path-carrying error where possible.
fn csv_error(source: &Path, err: csv::Error) -> ZipfError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(io) = err.into_kind() {
            return ZipfError::from_io(source, io);
        }
        return ZipfError::Internal("csv reported an I/O error without one".to_string());
    }
    match err.kind() {
        csv::ErrorKind::Utf8 { .. } => ZipfError::FileRead {
            path: source.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()),
        },
        _ => ZipfError::Csv(err),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
