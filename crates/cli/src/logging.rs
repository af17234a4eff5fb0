//! Process-wide logging setup
//!
//! Every line is rendered as
//! `[LEVEL] --<timestamp> - (<target>): <message> <fields>`, on stderr and
//! optionally in a log file. The subscriber is installed once per process;
//! later calls to [`init`] leave it untouched.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use std::fmt;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Crate targets that follow the configured level; everything else is
/// held at `warn`
const OWN_TARGETS: &[&str] = &["filewatch", "filewatch_core", "watcher", "cli_lib"];

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Event formatter producing `[LEVEL] --<timestamp> - (<target>): <message>`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFormat;

impl<S, N> FormatEvent<S, N> for LogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "[{}] --{} - ({}): ",
            level_name(meta.level()),
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.target()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Level label used in log lines
pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        _ => "ERROR",
    }
}

/// Filter directives for the given level name
pub fn filter_directives(level: &str) -> Result<String> {
    let level: LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", level))?;

    let level = level.to_string().to_lowercase();

    let mut directives = String::from("warn");
    for target in OWN_TARGETS {
        directives.push_str(&format!(",{}={}", target, level));
    }
    Ok(directives)
}

/// Install the process-wide subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Returns the
/// guard of the file writer, which must be kept alive for the process
/// lifetime; `None` when there is no log file or logging was already set up.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if INITIALIZED.load(Ordering::SeqCst) {
        return Ok(None);
    }

    let directives = filter_directives(&config.level)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LogFormat)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .event_format(LogFormat)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;
    INITIALIZED.store(true, Ordering::SeqCst);

    Ok(guard)
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("Failed to get current directory")?,
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
