use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Level used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LEVEL: &str = "warn";

// --- Formatter ---

/// Local-time event formatter: `timestamp LEVEL target: fields`.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            let color = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m \x1b[{color}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Filter ---

/// Builds the level filter: an explicit directive wins over `RUST_LOG`,
/// which wins over [`DEFAULT_LEVEL`].
///
/// # Errors
///
/// Returns an error when `level` is not a valid filter directive.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
    }
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped, so
///   results on stdout stay clean.
/// - File: when `file` is given, records are appended to it as well.
///
/// # Errors
///
/// Returns an error for an invalid level, an unopenable log file, or when a
/// global subscriber is already installed.
pub fn init_logging(
    level: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))
        })
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
