//! Env-gated debug logging.
//!
//! Soft-failure paths (registry saturation, dropped launch requests) report
//! here instead of the display, so the composed screen stays deterministic.
//! Nothing is written unless `TEXTDESK_WRITE_LOG` names a file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::OnceCell;

use crate::config::EnvConfig;

static LOG_SINK: OnceCell<Option<Mutex<File>>> = OnceCell::new();
static DEBUG_FLAG: OnceCell<bool> = OnceCell::new();

fn sink() -> &'static Option<Mutex<File>> {
    LOG_SINK.get_or_init(|| {
        let config = EnvConfig::from_env();
        config
            .write_log
            .as_deref()
            .and_then(|path| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .ok()
            })
            .map(Mutex::new)
    })
}

/// Returns whether verbose debug logging was requested via `TEXTDESK_DEBUG`.
pub fn debug_enabled() -> bool {
    *DEBUG_FLAG.get_or_init(|| EnvConfig::from_env().debug)
}

/// Appends one line to the debug log, if one is configured.
pub fn log_debug(message: &str) {
    if let Some(file) = sink() {
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "{message}");
        }
    }
}
