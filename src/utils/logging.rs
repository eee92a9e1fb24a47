// Logging utilities
//
// Wraps flexi_logger initialization and shutdown so async log output is
// flushed before the process exits. The registry itself never requires
// logging to be initialized; these helpers are for embedding applications.

use crate::config::Config;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::sync::Mutex;

/// Global logger handle, kept so shutdown can flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// Initializes file logging from the `[log]` config section.
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let handle = Logger::try_with_str(&config.log.level)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.log.file)
                .directory(&config.log.dir),
        )
        .rotate(
            Criterion::Size(config.log.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.log.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;

    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        *guard = Some(handle);
    }

    log::info!("logging initialized: {}/{}", config.log.dir, config.log.file);
    Ok(())
}

/// Flushes and shuts down the logger. Blocking; call before process exit.
pub fn shutdown() {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        if let Some(handle) = guard.take() {
            handle.flush();
            // dropping the handle waits for the async writer thread
        }
    }
}

/// Whether `init` has run and `shutdown` has not consumed the handle yet.
pub fn is_initialized() -> bool {
    LOGGER_HANDLE
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}
