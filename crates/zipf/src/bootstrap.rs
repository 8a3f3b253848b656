use anyhow::Context;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::{filter_fn, FilterFn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zipf_core::logging::{LogDestination, LogLevel};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Create the parent directory of `path` (and any missing ancestors).
pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Build the [`EnvFilter`] for a severity threshold.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_new(level.filter_directive()).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Field that marks an `error!` event as CRITICAL.
pub const CRITICAL_FIELD: &str = "critical";

/// Severity of an event as one of the five levels.
///
/// Events carrying a `critical` field are CRITICAL; everything else maps
/// from its `tracing` level.
pub fn event_severity(meta: &Metadata<'_>) -> LogLevel {
    if meta.fields().field(CRITICAL_FIELD).is_some() {
        return LogLevel::Critical;
    }
    match *meta.level() {
        Level::ERROR => LogLevel::Error,
        Level::WARN => LogLevel::Warning,
        Level::INFO => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

/// Gate events on the full five-level order.
///
/// [`EnvFilter`] cannot tell ERROR from CRITICAL, so this drops plain
/// `error!` events under a CRITICAL threshold. Spans always pass.
pub fn severity_gate(level: LogLevel) -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(move |meta| !meta.is_event() || level.allows(event_severity(meta)))
}

/// Build a subscriber that writes events at or above `level` to
/// `destination`.
///
/// Log files are opened in append mode and never receive ANSI colour codes;
/// stderr gets colour only when it is a terminal.
pub fn build_subscriber(
    level: LogLevel,
    destination: &LogDestination,
) -> anyhow::Result<impl Subscriber + Send + Sync + 'static> {
    let console = destination.writes_console().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
    });

    let file = match destination.file() {
        Some(path) => {
            ensure_parent_dir(path)?;
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(handle))
                    .with_target(false)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    Ok(tracing_subscriber::registry()
        .with(build_filter(level))
        .with(severity_gate(level))
        .with(console)
        .with(file))
}

/// Initialise the global `tracing` subscriber.
pub fn setup_logging(level: LogLevel, destination: &LogDestination) -> anyhow::Result<()> {
    build_subscriber(level, destination)?
        .try_init()
        .context("logging was already initialised")?;
    Ok(())
}

/// Emit a CRITICAL event. `tracing` has no such level, so it is an ERROR
/// event tagged with [`CRITICAL_FIELD`].
pub fn log_critical(message: &str) {
    tracing::error!(critical = true, "{}", message);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
