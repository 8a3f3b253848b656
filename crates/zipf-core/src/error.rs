use std::path::PathBuf;
use thiserror::Error;

use crate::messages::{render, Lang, MessageKey};

/// Who is responsible for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caused by the user or the environment: bad input, missing file, etc.
    External,
    /// A bug in this program.
    Internal,
}

/// All errors produced by the zipf tools.
///
/// `Display` gives the English message; use [`ZipfError::localized`] for
/// other languages.
#[derive(Error, Debug)]
pub enum ZipfError {
    /// The input file name does not end in `.csv`.
    #[error("{}: File must end in .csv", .0.display())]
    NotCsvSuffix(PathBuf),

    /// The input file does not exist.
    #[error("{}: File does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// The input file exists but cannot be opened for reading.
    #[error("{}: No read permission", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other failure while opening or reading a file.
    #[error("{}: Cannot read file: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row did not have exactly two fields.
    #[error("{}: line {line}: expected 2 fields, found {found}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    /// The count column is not a non-negative integer.
    #[error("{}: line {line}: count '{value}' is not a non-negative integer", .path.display())]
    InvalidCount {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// Summing counts for a word overflowed `u64`.
    #[error("count for '{0}' is too large")]
    CountOverflow(String),

    /// There is nothing to fit a power law to.
    #[error("{}: no word counts to fit", .0.display())]
    EmptyCounts(PathBuf),

    /// A configuration file could not be parsed.
    #[error("{}: invalid configuration: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// An explicitly requested configuration file is missing.
    #[error("{}: configuration file does not exist", .0.display())]
    ConfigNotFound(PathBuf),

    /// A CSV document could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Broken invariant inside the program.
    #[error("internal error (please report this bug): {0}")]
    Internal(String),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the zipf crates.
pub type Result<T> = std::result::Result<T, ZipfError>;

impl ZipfError {
    /// Classify the error as caused by the user/environment or by a bug.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZipfError::Internal(_) | ZipfError::Other(_) => ErrorKind::Internal,
            _ => ErrorKind::External,
        }
    }

    /// Map an I/O failure on `path` onto the most descriptive variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => ZipfError::FileNotFound(path),
            std::io::ErrorKind::PermissionDenied => ZipfError::PermissionDenied(path),
            _ => ZipfError::FileRead { path, source },
        }
    }

    /// Short reason used in "not processed" reports, without the file name.
    pub fn reason(&self, lang: Lang) -> String {
        match self {
            ZipfError::FileNotFound(_) => match lang {
                Lang::En => "File does not exist".to_string(),
                Lang::Es => "El archivo no existe".to_string(),
            },
            ZipfError::PermissionDenied(_) => match lang {
                Lang::En => "No read permission".to_string(),
                Lang::Es => "Sin permiso de lectura".to_string(),
            },
            other => other.localized(lang),
        }
    }

    /// Render this error through the message catalog.
    pub fn localized(&self, lang: Lang) -> String {
        match self {
            ZipfError::NotCsvSuffix(p) => {
                render(lang, MessageKey::NotCsvSuffix, &[("fname", p.display().to_string())])
            }
            ZipfError::FileNotFound(p) => {
                render(lang, MessageKey::FileNotFound, &[("fname", p.display().to_string())])
            }
            ZipfError::PermissionDenied(p) => {
                render(
                    lang,
                    MessageKey::NoReadPermission,
                    &[("fname", p.display().to_string())],
                )
            }
            ZipfError::FileRead { path, source } => render(
                lang,
                MessageKey::CannotRead,
                &[("fname", path.display().to_string()), ("reason", source.to_string())],
            ),
            ZipfError::MalformedRow { path, line, found } => render(
                lang,
                MessageKey::MalformedRow,
                &[
                    ("fname", path.display().to_string()),
                    ("line", line.to_string()),
                    ("found", found.to_string()),
                ],
            ),
            ZipfError::InvalidCount { path, line, value } => render(
                lang,
                MessageKey::InvalidCount,
                &[
                    ("fname", path.display().to_string()),
                    ("line", line.to_string()),
                    ("value", value.clone()),
                ],
            ),
            ZipfError::CountOverflow(word) => {
                render(lang, MessageKey::CountOverflow, &[("word", word.clone())])
            }
            ZipfError::EmptyCounts(p) => {
                render(lang, MessageKey::EmptyCounts, &[("fname", p.display().to_string())])
            }
            ZipfError::Config { path, reason } => render(
                lang,
                MessageKey::ConfigInvalid,
                &[("fname", path.display().to_string()), ("reason", reason.clone())],
            ),
            ZipfError::ConfigNotFound(p) => {
                render(
                    lang,
                    MessageKey::ConfigNotFound,
                    &[("fname", p.display().to_string())],
                )
            }
            ZipfError::Internal(reason) => {
                render(lang, MessageKey::Internal, &[("reason", reason.clone())])
            }
            ZipfError::Other(err) => {
                render(lang, MessageKey::Internal, &[("reason", err.to_string())])
            }
            ZipfError::Csv(_) | ZipfError::Io(_) => self.to_string(),
        }
    }
}
