// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake status channel for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ChannelError, StatusChannel};
use pstub_core::Message;

/// Records every message; optionally fails after a number of sends
#[derive(Debug, Default)]
pub struct FakeChannel {
    sent: Vec<Message>,
    fail_after: Option<usize>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send once `n` messages have been accepted
    pub fn failing_after(n: usize) -> Self {
        Self {
            sent: Vec::new(),
            fail_after: Some(n),
        }
    }

    pub fn sent(&self) -> &[Message] {
        &self.sent
    }
}

impl StatusChannel for FakeChannel {
    fn send(&mut self, msg: Message) -> Result<(), ChannelError> {
        if self.fail_after.is_some_and(|n| self.sent.len() >= n) {
            return Err(ChannelError::Write(std::io::Error::from(
                std::io::ErrorKind::BrokenPipe,
            )));
        }
        self.sent.push(msg);
        Ok(())
    }
}
