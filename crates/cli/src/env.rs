// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the stub.

use std::path::PathBuf;

/// Log file path. Logging stays off when unset.
pub fn log_file() -> Option<PathBuf> {
    std::env::var_os("PSTUB_LOG_FILE")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Directory for session notification queues: PSTUB_QUEUE_DIR > system temp dir
pub fn queue_dir() -> PathBuf {
    std::env::var_os("PSTUB_QUEUE_DIR")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}
