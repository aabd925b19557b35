//! File-based logging with tracing integration
//!
//! Opens the active log in append mode and installs a `tracing` subscriber that
//! writes `<timestamp> - <level> - <message>` lines into it. The subscriber is
//! scoped to the returned [`LoggingGuard`]; dropping or shutting down the guard
//! uninstalls it and flushes the file.

use std::fmt::{self, Write as _};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use super::record::{LogLevel, LogRecord};
use crate::config::LoggingConfig;

/// Information about the active log file
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    /// Full path to the log file
    pub path: PathBuf,
}

/// Shared handle to the open active log
#[derive(Clone)]
struct LogSink {
    file: Arc<Mutex<File>>,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut file) = self.file.lock() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut file) = self.file.lock() {
            file.flush()
        } else {
            Ok(())
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Formats events as record lines
struct RecordFormat;

impl<S, N> FormatEvent<S, N> for RecordFormat
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
        let mut message = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut message), event)?;

        let record = LogRecord::new(
            Local::now().naive_local(),
            LogLevel::from(*event.metadata().level()),
            message,
        );
        writeln!(writer, "{}", record)
    }
}

/// Guard that keeps the logging system alive
///
/// Events emitted on this thread go to the active log until the guard is
/// dropped or [`LoggingGuard::shutdown`] is called.
pub struct LoggingGuard {
    _default: DefaultGuard,
    file: Arc<Mutex<File>>,
}

impl LoggingGuard {
    /// Flush pending records to disk and uninstall the subscriber
    pub fn shutdown(self) -> Result<()> {
        let file = Arc::clone(&self.file);
        drop(self);

        let mut file = file
            .lock()
            .map_err(|_| anyhow::anyhow!("Log file lock poisoned"))?;
        file.flush().context("Failed to flush log file")?;
        file.sync_all().context("Failed to sync log file")?;
        Ok(())
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Build the filter: RUST_LOG if set, otherwise `pos_sim=<level>`
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("pos_sim={}", level).into())
}

/// Initialize file logging into the active log
///
/// Returns the log file info and a guard that must be kept alive for the duration of logging.
pub fn init_file_logging(config: &LoggingConfig) -> Result<(LogFileInfo, LoggingGuard)> {
    init_file_logging_with_filter(config, env_filter(&config.level))
}

/// Same as [`init_file_logging`] with an explicit filter, ignoring RUST_LOG
pub(crate) fn init_file_logging_with_filter(
    config: &LoggingConfig,
    filter: EnvFilter,
) -> Result<(LogFileInfo, LoggingGuard)> {
    fs::create_dir_all(&config.logs_dir).context("Failed to create logs directory")?;

    let log_path = config.active_log_path();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let file = Arc::new(Mutex::new(file));

    let sink = LogSink {
        file: Arc::clone(&file),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(sink)
        .with_ansi(false)
        .event_format(RecordFormat)
        .finish();

    let default = tracing::subscriber::set_default(subscriber);

    let info = LogFileInfo { path: log_path };
    let guard = LoggingGuard {
        _default: default,
        file,
    };

    Ok((info, guard))
}
