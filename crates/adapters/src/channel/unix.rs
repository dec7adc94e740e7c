// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix domain stream socket channel

use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::Path;

use pstub_core::Message;

use super::{ChannelError, StatusChannel};

/// Connected stream socket to the controller
#[derive(Debug)]
pub struct UnixChannel {
    stream: UnixStream,
}

impl UnixChannel {
    /// Connect to the controller's socket.
    pub fn connect(path: &Path) -> Result<Self, ChannelError> {
        let stream = UnixStream::connect(path).map_err(|source| ChannelError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "connected to controller");
        Ok(Self { stream })
    }
}

impl StatusChannel for UnixChannel {
    fn send(&mut self, msg: Message) -> Result<(), ChannelError> {
        let line = msg.to_line();
        self.stream
            .write_all(line.as_bytes())
            .and_then(|()| self.stream.flush())
            .map_err(ChannelError::Write)?;
        tracing::info!(line = %msg, "sent to controller");
        Ok(())
    }
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
