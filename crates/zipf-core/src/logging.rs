//! Severity levels and log destinations.
//!
//! Five ordered levels gate which diagnostics are emitted. `tracing` has no
//! CRITICAL level: critical events are ERROR events tagged `critical`, and
//! [`LogLevel::allows`] decides whether an event passes a threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ── LogLevel ──────────────────────────────────────────────────────────────────

/// Diagnostic severity, ordered from least to most severe.
///
/// Serialized as the upper-case name; parsing is case-insensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// All levels, least severe first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    /// Upper-case name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// `EnvFilter` directive for this threshold.
    ///
    /// CRITICAL and ERROR share a directive; telling them apart needs
    /// [`LogLevel::allows`] on top.
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }

    /// Whether a message of severity `message` passes this threshold.
    pub fn allows(self, message: LogLevel) -> bool {
        message >= self
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(format!(
                "unknown log level '{other}' (expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL)"
            )),
        }
    }
}

// ── LogDestination ────────────────────────────────────────────────────────────

/// Where emitted diagnostics are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Standard error only.
    Console,
    /// The given file only.
    File(PathBuf),
    /// Both standard error and the given file.
    Both(PathBuf),
}

impl LogDestination {
    /// Build a destination from the `--logfile` / `--log-both` pair.
    ///
    /// `log_both` has no effect without a log file.
    pub fn from_parts(logfile: Option<PathBuf>, log_both: bool) -> Self {
        match (logfile, log_both) {
            (None, _) => LogDestination::Console,
            (Some(path), false) => LogDestination::File(path),
            (Some(path), true) => LogDestination::Both(path),
        }
    }

    pub fn writes_console(&self) -> bool {
        matches!(self, LogDestination::Console | LogDestination::Both(_))
    }

    pub fn file(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(p) | LogDestination::Both(p) => Some(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_allows_gates_by_threshold() {
        let threshold = LogLevel::Warning;
        assert!(!threshold.allows(LogLevel::Debug));
        assert!(!threshold.allows(LogLevel::Info));
        assert!(threshold.allows(LogLevel::Warning));
        assert!(threshold.allows(LogLevel::Error));
        assert!(threshold.allows(LogLevel::Critical));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("CRITICAL".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_critical_threshold_rejects_error() {
        assert_eq!(LogLevel::Critical.filter_directive(), "error");
        assert!(!LogLevel::Critical.allows(LogLevel::Error));
        assert!(LogLevel::Critical.allows(LogLevel::Critical));
        assert!(LogLevel::Error.allows(LogLevel::Critical));
        assert_eq!(LogLevel::Warning.filter_directive(), "warn");
    }

    #[test]
    fn test_default_is_warning() {
        assert_eq!(LogLevel::default(), LogLevel::Warning);
    }

    #[test]
    fn test_destination_from_parts() {
        assert_eq!(LogDestination::from_parts(None, true), LogDestination::Console);

        let file = LogDestination::from_parts(Some(PathBuf::from("run.log")), false);
        assert_eq!(file, LogDestination::File(PathBuf::from("run.log")));
        assert!(!file.writes_console());
        assert_eq!(file.file(), Some(Path::new("run.log")));

        let both = LogDestination::from_parts(Some(PathBuf::from("run.log")), true);
        assert!(both.writes_console());
        assert_eq!(both.file(), Some(Path::new("run.log")));
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let level: LogLevel = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(level, LogLevel::Info);
        assert_eq!(serde_json::to_string(&LogLevel::Error).unwrap(), "\"ERROR\"");
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }
}
