// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Termination notification queue for session launches.
//!
//! A named FIFO owned by the stub. Both ends are opened when the queue is
//! created: the stub keeps the read end, the session monitor gets the write
//! end as a [`QueuePoster`] and posts exactly one 4-byte element when the
//! target ends:
//!
//! ```text
//! bits 31..16  result code
//! bits 15..0   session id
//! ```
//!
//! A poster dropped without posting closes the write end, so the reader
//! sees end-of-file instead of waiting forever.

use nix::fcntl::OFlag;
use nix::sys::stat::Mode;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

const ELEMENT_LEN: usize = 4;

/// Pack a result code and session id into one queue element
pub fn pack_element(result_code: u16, session_id: u32) -> u32 {
    (u32::from(result_code) << 16) | (session_id & 0xffff)
}

/// Result code carried in the high half of an element
pub fn element_result(element: u32) -> u16 {
    (element >> 16) as u16
}

/// Named queue, unlinked when dropped
#[derive(Debug)]
pub struct NotificationQueue {
    path: PathBuf,
    reader: File,
}

/// Write end of a queue; posts at most one element
#[derive(Debug)]
pub struct QueuePoster {
    writer: File,
}

impl NotificationQueue {
    /// Queue name derived from the owning process id
    pub fn name_for(dir: &Path, owner_pid: u32) -> PathBuf {
        dir.join(format!("pstub-term.{}", owner_pid))
    }

    /// Create the queue for `owner_pid` inside `dir`, with its poster.
    pub fn create(dir: &Path, owner_pid: u32) -> io::Result<(Self, QueuePoster)> {
        let path = Self::name_for(dir, owner_pid);
        nix::unistd::mkfifo(path.as_path(), Mode::S_IRUSR | Mode::S_IWUSR)?;

        match open_ends(&path) {
            Ok((reader, writer)) => {
                tracing::debug!(queue = %path.display(), "created notification queue");
                Ok((Self { path, reader }, QueuePoster { writer }))
            }
            Err(e) => {
                let _ = std::fs::remove_file(&path);
                Err(e)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the single element arrives or the poster goes away.
    pub fn read_element(&self) -> io::Result<u32> {
        let mut buf = [0u8; ELEMENT_LEN];
        (&self.reader).read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }
}

/// Open the read end, then the write end, without blocking on either.
///
/// A non-blocking reader lets the writer open at once; with the writer held,
/// a second blocking reader opens at once too and replaces the first.
fn open_ends(path: &Path) -> io::Result<(File, File)> {
    let placeholder = OpenOptions::new()
        .read(true)
        .custom_flags(OFlag::O_NONBLOCK.bits())
        .open(path)?;
    let writer = OpenOptions::new().write(true).open(path)?;
    let reader = File::open(path)?;
    drop(placeholder);
    Ok((reader, writer))
}

impl Drop for NotificationQueue {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(queue = %self.path.display(), error = %e, "failed to remove notification queue");
        }
    }
}

impl QueuePoster {
    /// Post one element; the write end closes afterwards.
    pub fn post(mut self, element: u32) -> io::Result<()> {
        self.writer.write_all(&element.to_le_bytes())
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
