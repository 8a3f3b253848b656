use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, ZipfError};
use crate::logging::{LogDestination, LogLevel};
use crate::messages::{parse_lang, Lang};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Count, collate and fit word frequencies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "zipf",
    about = "Count, collate and fit word frequencies",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Logging threshold
    #[arg(long, global = true, default_value = "WARNING")]
    pub log_level: LogLevel,

    /// Log everything (same as --log-level DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log messages to this file instead of stderr
    #[arg(short = 'l', long, global = true)]
    pub logfile: Option<PathBuf>,

    /// With --logfile, also keep logging to stderr
    #[arg(long, global = true)]
    pub log_both: bool,

    /// Language for diagnostics (en, es)
    #[arg(long, global = true, env = "ZIPF_LANG", default_value = "en", value_parser = parse_lang)]
    pub lang: Lang,

    /// Configuration file (defaults to ~/.zipf/config.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Sub-commands of the `zipf` binary.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Count the occurrences of all words in a text and output them in CSV format
    Countwords {
        /// Input file name (omit or use '-' for stdin)
        infile: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Combine multiple word count CSV files into a single cumulative count
    Collate {
        /// Input CSV files or directories containing them
        #[arg(required = true)]
        infiles: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,

        /// Stop at the first file that cannot be processed
        #[arg(long)]
        strict: bool,
    },

    /// Estimate the Zipf exponent of a word count CSV file
    Fit {
        /// Input CSV file
        infile: PathBuf,
    },
}

/// Output options shared by the counting commands.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct OutputArgs {
    /// Limit output to N most frequent words
    #[arg(short, long)]
    pub num: Option<usize>,

    /// Write the CSV here instead of stdout
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

// ── FileConfig ─────────────────────────────────────────────────────────────────

/// Optional JSON configuration, e.g. `~/.zipf/config.json`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<LogLevel>,
    pub logfile: Option<PathBuf>,
    pub log_both: Option<bool>,
    pub lang: Option<Lang>,
}

impl FileConfig {
    /// Return the default config path, `~/.zipf/config.json`.
    pub fn default_path() -> PathBuf {
        Self::path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".zipf").join("config.json")
    }

    /// Load a config file that must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ZipfError::ConfigNotFound(path.to_path_buf()),
            _ => ZipfError::from_io(path, e),
        })?;
        serde_json::from_str(&content).map_err(|e| ZipfError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load a config file, returning `Default` when it is absent.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, exiting on usage errors.
    pub fn parse_args() -> ArgMatches {
        Settings::command().get_matches()
    }

    /// The language asked for on the command line or through the
    /// environment, ignoring any config file.
    ///
    /// Used to report errors that happen before the config file is read.
    pub fn requested_lang(matches: &ArgMatches, system_locale: Option<&str>) -> Lang {
        if is_arg_set_by_user(matches, "lang") {
            if let Some(lang) = matches.get_one::<Lang>("lang") {
                return *lang;
            }
        }
        system_locale.map(Lang::from_locale).unwrap_or_default()
    }

    /// Merge parsed arguments with the config file.
    ///
    /// Precedence is: explicit flag, then `ZIPF_LANG` (for the language),
    /// then the config file, then `system_locale` (for the language), then
    /// built-in defaults. `default_config` is only read when `--config` was
    /// not given, and only if it exists.
    pub fn from_matches(
        matches: &ArgMatches,
        default_config: &Path,
        system_locale: Option<&str>,
    ) -> Result<Self> {
        let mut settings = Settings::from_arg_matches(matches)
            .map_err(|e| ZipfError::Internal(format!("argument mapping failed: {e}")))?;

        let config = match &settings.config {
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::load_optional(default_config)?,
        };

        // CLI always wins; clap stores arg ids under the field name.
        if !is_arg_explicitly_set(matches, "log_level") {
            if let Some(level) = config.log_level {
                settings.log_level = level;
            }
        }
        if !is_arg_explicitly_set(matches, "logfile") {
            settings.logfile = config.logfile;
        }
        if !is_arg_explicitly_set(matches, "log_both") {
            if let Some(both) = config.log_both {
                settings.log_both = both;
            }
        }
        if !is_arg_set_by_user(matches, "lang") {
            settings.lang = config
                .lang
                .unwrap_or_else(|| Self::requested_lang(matches, system_locale));
        }

        // --verbose overrides the log level.
        if settings.verbose {
            settings.log_level = LogLevel::Debug;
        }

        Ok(settings)
    }

    /// Where diagnostics should go.
    pub fn log_destination(&self) -> LogDestination {
        LogDestination::from_parts(self.logfile.clone(), self.log_both)
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

/// Like [`is_arg_explicitly_set`] but also counts environment variables.
fn is_arg_set_by_user(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(clap::parser::ValueSource::CommandLine | clap::parser::ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
