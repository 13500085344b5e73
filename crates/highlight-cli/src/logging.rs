//! Console and file logging for a run.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use highlight_core::{Error, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber: console output filtered by `RUST_LOG`
/// (default `info`), plus `info.log` and `debug.log` in `logs_dir`.
pub fn init(logs_dir: &Path) -> Result<()> {
    let info_file = File::create(logs_dir.join("info.log"))?;
    let debug_file = File::create(logs_dir.join("debug.log"))?;

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(console_filter))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(info_file))
                .with_filter(LevelFilter::INFO),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(debug_file))
                .with_filter(LevelFilter::DEBUG),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install logger: {}", e)))
}
