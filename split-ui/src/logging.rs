//! Logging for the `MySplit` binary.
//!
//! Records go to stderr (so they never interleave with the bill on stdout)
//! and, once [`enable_file_logging`] is called, to an append-only file. The
//! level and the stderr echo can both be changed while the session runs.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

// --- Formatter ---

/// `<local time> <LEVEL> <file>:<line> <fields>`, colored when the writer
/// supports ANSI.
struct SplitFmt;

impl SplitFmt {
    fn level_color(level: Level) -> &'static str {
        match level {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        }
    }
}

impl<S, N> FormatEvent<S, N> for SplitFmt
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
        let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        let level = *meta.level();

        if ansi {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{level:>5}\x1b[0m ",
                Self::level_color(level)
            )?;
        } else {
            write!(writer, "{stamp} {level:>5} ")?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file.rsplit(['/', '\\']).next().unwrap_or(file);
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock_file(slot: &SharedFile) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer target that can be pointed at a file after start-up. Writes are
/// dropped while no file is set.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_file(&self.0))
    }
}

// --- Runtime handles ---

struct Handles {
    set_level: Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>,
    set_console: Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>,
    file: SharedFile,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

fn initial_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_filter(enabled: bool) -> EnvFilter {
    // The global level filter still applies on top of "trace".
    EnvFilter::new(if enabled { "trace" } else { "off" })
}

// --- Public API ---

/// Installs the global subscriber. Call once at startup; later calls are
/// ignored.
///
/// - Level: `RUST_LOG` when set, otherwise `default_level`.
/// - Console: stderr, colored when attached to a terminal.
/// - File: inactive until [`enable_file_logging`] is called.
pub fn init_logging(
    default_level: &str,
    console: bool,
) {
    let file: SharedFile = Arc::new(Mutex::new(None));

    let (level_layer, level_handle) = reload::Layer::new(initial_filter(default_level));
    let (console_gate, console_handle) = reload::Layer::new(console_filter(console));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(SplitFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(SplitFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = HANDLES.set(Handles {
            set_level: Box::new(move |filter| {
                level_handle
                    .reload(filter)
                    .map_err(|e| anyhow!("log level reload failed: {e}"))
            }),
            set_console: Box::new(move |filter| {
                console_handle
                    .reload(filter)
                    .map_err(|e| anyhow!("console reload failed: {e}"))
            }),
            file,
        });
    }
}

/// Changes the active log filter. Accepts a bare level ("warn", "debug")
/// or any `EnvFilter` directive.
pub fn set_log_level(level: &str) -> Result<()> {
    let handles = handles()?;
    let filter =
        EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
    (handles.set_level)(filter)
}

/// Shows or hides log output on stderr without affecting file logging.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    (handles()?.set_console)(console_filter(enabled))
}

/// Starts appending log records to `path`, replacing any open log file.
/// The parent directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let handles = handles()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;
    *lock_file(&handles.file) = Some(file);
    Ok(())
}

/// Closes the current log file, if any.
pub fn disable_file_logging() {
    if let Ok(handles) = handles() {
        *lock_file(&handles.file) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_writer_discards_without_file() {
        let slot = FileSlot(Arc::new(Mutex::new(None)));
        let mut writer = slot.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn runtime_controls_fail_before_init() {
        let err = set_log_level("debug").unwrap_err();

        assert_eq!(err.to_string(), "logging not yet initialized");
        assert!(set_console_enabled(false).is_err());
    }
}
