// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logging.
//!
//! The console belongs to the target, so nothing is logged there.

use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log path has no file name: {0}")]
    NoFileName(String),
    #[error("subscriber setup failed: {0}")]
    Subscriber(String),
}

/// Install a file subscriber. Keep the guard alive until exit so logs flush.
pub fn setup_logging(log_path: &Path) -> Result<WorkerGuard, LoggingError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::NoFileName(log_path.display().to_string()))?;
    let dir = log_path.parent().unwrap_or_else(|| Path::new(""));
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))?;

    Ok(guard)
}
