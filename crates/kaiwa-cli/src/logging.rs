use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "KAIWA_LOG";
const DEFAULT_FILTER: &str = "kaiwa=info,kaiwa_core=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// The full-screen UI owns the terminal, so logs go to a file instead.
/// Returns the log path, or `None` when no cache directory is writable.
pub fn init_file() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("kaiwa");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("kaiwa.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(path)
}
