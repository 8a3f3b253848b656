mod bootstrap;

use std::io::Write;
use std::process::ExitCode;

use zipf_core::logging::LogLevel;
use zipf_core::settings::{Command, FileConfig, Settings};
use zipf_core::{ErrorKind, Result, ZipfError};
use zipf_data::analysis::fit_file;
use zipf_data::collate::Collator;
use zipf_data::counter::count_input;
use zipf_data::writer::collection_to_csv;

/// Exit status for errors caused by the user or the environment.
const EXIT_EXTERNAL: u8 = 1;
/// Exit status for bugs. Usage errors use clap's own status 2.
const EXIT_INTERNAL: u8 = 3;

fn main() -> ExitCode {
    let matches = Settings::parse_args();
    let locale = std::env::var("LANG").ok();
    let settings =
        match Settings::from_matches(&matches, &FileConfig::default_path(), locale.as_deref()) {
            Ok(settings) => settings,
            Err(err) => {
                let lang = Settings::requested_lang(&matches, locale.as_deref());
                eprintln!("zipf: {}", err.localized(lang));
                return exit_code(&err);
            }
        };

    let destination = settings.log_destination();
    if let Err(err) = bootstrap::setup_logging(settings.log_level, &destination) {
        eprintln!("zipf: {err:#}");
        return ExitCode::from(EXIT_EXTERNAL);
    }

    tracing::info!("zipf v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Log level: {}, language: {}, destination: {:?}",
        settings.log_level,
        settings.lang,
        destination
    );

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err.localized(settings.lang);
            let logged = destination.file().is_some();
            if logged {
                match err.kind() {
                    ErrorKind::External => tracing::error!("{}", message),
                    ErrorKind::Internal => bootstrap::log_critical(&message),
                }
            }
            // Reported exactly once on stderr, whether or not the console
            // layer let the logged copy through.
            let on_console = logged
                && destination.writes_console()
                && settings.log_level.allows(severity(&err));
            if !on_console {
                eprintln!("zipf: {message}");
            }
            exit_code(&err)
        }
    }
}

/// Dispatch the selected sub-command. Every error ends up here and is
/// reported once by `main`.
fn run(settings: &Settings) -> Result<()> {
    match &settings.command {
        Command::Countwords { infile, output } => {
            let counts = count_input(infile.as_deref())?;
            collection_to_csv(&counts, output.num, output.outfile.as_deref())
        }
        Command::Collate {
            infiles,
            output,
            strict,
        } => {
            let report = Collator::new(settings.lang)
                .strict(*strict)
                .collate(infiles)?;
            collection_to_csv(&report.counts, output.num, output.outfile.as_deref())
        }
        Command::Fit { infile } => {
            let fit = fit_file(infile)?;
            writeln!(std::io::stdout().lock(), "alpha: {:.3}", fit.alpha)?;
            Ok(())
        }
    }
}

/// Level a fatal error is logged at.
fn severity(err: &ZipfError) -> LogLevel {
    match err.kind() {
        ErrorKind::External => LogLevel::Error,
        ErrorKind::Internal => LogLevel::Critical,
    }
}

fn exit_code(err: &ZipfError) -> ExitCode {
    match err.kind() {
        ErrorKind::External => ExitCode::from(EXIT_EXTERNAL),
        ErrorKind::Internal => ExitCode::from(EXIT_INTERNAL),
    }
}
