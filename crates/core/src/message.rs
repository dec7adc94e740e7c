// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented status messages sent to the controller.
//!
//! Wire format: one ASCII line per message, `\n` terminated.
//!
//! ```text
//! pid <integer>
//! exit <integer>
//! crash <cause-code>
//! err:<phase> <errno>
//! ```

use std::fmt;

use crate::termination::{CrashCause, Outcome};

/// Setup phase named in an `err:` message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Chdir,
    Exec,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Chdir => "chdir",
            Phase::Exec => "exec",
        }
    }
}

/// One message on the status channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Pid(u32),
    Exit(i32),
    Crash(CrashCause),
    Error { phase: Phase, code: i32 },
}

impl Message {
    /// Encoded line including the trailing newline
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Pid(pid) => write!(f, "pid {}", pid),
            Message::Exit(code) => write!(f, "exit {}", code),
            Message::Crash(cause) => write!(f, "crash {}", cause.code()),
            Message::Error { phase, code } => write!(f, "err:{} {}", phase.as_str(), code),
        }
    }
}

impl From<Outcome> for Message {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Exited(code) => Message::Exit(code),
            Outcome::Crashed(cause) => Message::Crash(cause),
        }
    }
}

/// OS error code carried by an I/O error, 0 when it has none
pub fn os_code(err: &std::io::Error) -> i32 {
    err.raw_os_error().unwrap_or(0)
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
