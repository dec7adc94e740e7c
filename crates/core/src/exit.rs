// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process exit status of the stub itself.
//!
//! The target's own exit code travels over the channel; the stub's exit
//! status only says whether the stub completed its protocol.

/// Exit status of one stub invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubExit {
    /// Protocol completed, outcome reported
    Completed,
    /// Usage error, unreachable channel, or working directory failure
    Invocation,
    /// OS or internal failure
    Internal,
}

impl StubExit {
    pub fn code(self) -> i32 {
        match self {
            StubExit::Completed => 0,
            StubExit::Invocation => 1,
            StubExit::Internal => 3,
        }
    }
}

impl From<StubExit> for std::process::ExitCode {
    fn from(exit: StubExit) -> Self {
        // Codes are 0, 1 and 3, always within u8
        std::process::ExitCode::from(exit.code() as u8)
    }
}

#[cfg(test)]
#[path = "exit_tests.rs"]
mod tests;
