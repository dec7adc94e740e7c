// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw termination data and its portable classification.

use nix::sys::signal::Signal;

/// How the OS says the target ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// Regular exit with a result code
    Exit,
    /// Hard I/O error ended the process
    HardError,
    /// Processor trap (bad memory access, illegal instruction, ...)
    Trap,
    /// Forced kill
    Kill,
    /// Unhandled exception / abort
    Exception,
}

impl TerminationCause {
    /// Cause for a process ended by `signal`.
    pub fn from_signal(signal: i32) -> Self {
        match Signal::try_from(signal) {
            Ok(
                Signal::SIGSEGV
                | Signal::SIGBUS
                | Signal::SIGILL
                | Signal::SIGFPE
                | Signal::SIGSYS
                | Signal::SIGTRAP,
            ) => TerminationCause::Trap,
            Ok(Signal::SIGABRT) => TerminationCause::Exception,
            _ => TerminationCause::Kill,
        }
    }
}

/// Termination cause plus result code, exactly as observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTermination {
    pub cause: TerminationCause,
    pub code: i32,
}

impl RawTermination {
    pub fn exited(code: i32) -> Self {
        Self {
            cause: TerminationCause::Exit,
            code,
        }
    }

    pub fn signaled(signal: i32) -> Self {
        Self {
            cause: TerminationCause::from_signal(signal),
            code: signal,
        }
    }
}

/// Abnormal termination class reported to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    SegmentationFault,
    Killed,
}

impl CrashCause {
    /// Wire code: the host's signal number for the class
    pub fn code(self) -> i32 {
        match self {
            CrashCause::SegmentationFault => Signal::SIGSEGV as i32,
            CrashCause::Killed => Signal::SIGKILL as i32,
        }
    }
}

/// Portable outcome of the target's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited(i32),
    Crashed(CrashCause),
}

/// Map raw termination data to an outcome.
pub fn classify(raw: RawTermination) -> Outcome {
    match raw.cause {
        TerminationCause::Trap | TerminationCause::Exception => {
            Outcome::Crashed(CrashCause::SegmentationFault)
        }
        TerminationCause::HardError | TerminationCause::Kill => {
            Outcome::Crashed(CrashCause::Killed)
        }
        TerminationCause::Exit => Outcome::Exited(raw.code),
    }
}

#[cfg(test)]
#[path = "termination_tests.rs"]
mod tests;
