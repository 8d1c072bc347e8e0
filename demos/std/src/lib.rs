//! Shared setup for the demo binaries.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;

/// History file, relative to the home directory
pub const HISTORY_FILE: &str = ".histline_history";

pub fn log_path() -> PathBuf {
    env::var("HISTLINE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("histline-demo.log"))
}

/// Send tracing output to [`log_path`]. Writing to the terminal would
/// mess up the prompt in raw mode.
pub fn init_logging() {
    let file = match OpenOptions::new().create(true).append(true).open(log_path()) {
        Ok(file) => file,
        Err(_) => return,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
