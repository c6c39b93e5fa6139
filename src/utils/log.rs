use std::fs::File;
use std::io::{Write, stderr};
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use chrono::Local;
use miette::{Context, IntoDiagnostic, miette};
use tracing::level_filters::LevelFilter;
use tracing::{Level, debug, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::reload;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload::Handle, util::SubscriberInitExt,
};

pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    file_handle: Mutex<Box<dyn LogHandle>>,
    /// None when the log file could not be created
    log_file: Option<PathBuf>,
}

/// Directory the file layer writes into
pub fn log_dir() -> PathBuf {
    std::env::temp_dir().join("chesskit_logs")
}

fn create_log_file() -> std::io::Result<(PathBuf, File)> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = dir.join(format!("chesskit_{timestamp}.log"));
    let file = File::create(&path)?;
    Ok((path, file))
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console Layer with its own reloadable filter
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File Layer with its own reloadable filter (initially off)
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    let (file_filter, file_handle) = reload::Layer::new(file_filter);

    let (log_file, sink): (Option<PathBuf>, Box<dyn Write + Send>) = match create_log_file() {
        Ok((path, file)) => (Some(path), Box::new(file)),
        Err(_) => (None, Box::new(std::io::sink())),
    };
    let (non_blocking_writer, guard) = non_blocking(sink);
    std::mem::forget(guard); // Keep the guard alive.

    let file_layer = fmt::layer()
        .with_writer(non_blocking_writer)
        .with_ansi(false) // No colors in file
        .with_filter(file_filter);

    // Someone else may own the global subscriber already (tests, embedders)
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: Mutex::new(Box::new(file_handle)),
        log_file,
    }
});

pub fn set_log_level(level: Level) -> miette::Result<()> {
    let new_filter = EnvFilter::new(level.to_string());

    LOG_HANDLES
        .console_handle
        .lock()
        .map_err(|_| miette!("Console log handle poisoned"))?
        .set_filter(new_filter)
        .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    if enable && LOG_HANDLES.log_file.is_none() {
        warn!("No log file available under {}", log_dir().display());
    }
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    LOG_HANDLES
        .file_handle
        .lock()
        .map_err(|_| miette!("File log handle poisoned"))?
        .set_filter(new_filter)
        .context("Failed to modify log filter")
}

/// Path of this run's log file, if one was created
pub fn log_file() -> Option<PathBuf> {
    LOG_HANDLES.log_file.clone()
}

/// Initialize tracing and backtrace
pub fn init() {
    LazyLock::force(&LOG_HANDLES);
    debug!("Logging to {:?}", LOG_HANDLES.log_file);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        set_log_level(Level::DEBUG).unwrap();
        set_log_level(Level::INFO).unwrap();
        toggle_file_logging(false).unwrap();
        if let Some(path) = log_file() {
            assert!(path.starts_with(log_dir()));
        }
    }
}
