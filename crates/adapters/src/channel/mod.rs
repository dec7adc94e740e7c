// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status channel to the controller

mod unix;

pub use unix::UnixChannel;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeChannel;

use pstub_core::Message;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from channel operations
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Cannot connect comm socket {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write to comm socket: {0}")]
    Write(#[source] std::io::Error),
}

/// One-way, line-oriented status reporting to the controller
pub trait StatusChannel {
    /// Send one message as a single line
    fn send(&mut self, msg: Message) -> Result<(), ChannelError>;
}
