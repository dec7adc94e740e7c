// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation descriptor built from the stub's positional arguments.
//!
//! Syntax: `pstub {run|debug} <channel> <continuation> <workdir> <exe> <args>`

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Usage line printed on invocation errors
pub const USAGE: &str =
    "usage: pstub {run|debug} <channel> <continuation-message> <workdir> <exe> <args>";

/// Number of positional arguments after the program name
const ARG_COUNT: usize = 6;

/// Errors detected before any channel I/O
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("expected 6 arguments, got {0}")]
    Arity(usize),
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// What the controller asked for.
///
/// Both actions launch the target the same way; `Debug` is only recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run,
    Debug,
}

impl Action {
    fn parse(raw: &OsStr) -> Result<Self, UsageError> {
        match raw.to_str() {
            Some("run") => Ok(Action::Run),
            Some("debug") => Ok(Action::Debug),
            _ => Err(UsageError::UnknownAction(raw.to_string_lossy().into_owned())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Run => "run",
            Action::Debug => "debug",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one stub invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    action: Action,
    channel: PathBuf,
    continuation: OsString,
    workdir: PathBuf,
    target: PathBuf,
    target_args: OsString,
}

impl Invocation {
    /// Parse a full argument vector (program name first).
    pub fn from_args<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().skip(1).collect();
        if args.len() != ARG_COUNT {
            return Err(UsageError::Arity(args.len()));
        }

        let target_args = args.pop().unwrap_or_default();
        let target = PathBuf::from(args.pop().unwrap_or_default());
        let workdir = PathBuf::from(args.pop().unwrap_or_default());
        let continuation = args.pop().unwrap_or_default();
        let channel = PathBuf::from(args.pop().unwrap_or_default());
        let action = Action::parse(&args.pop().unwrap_or_default())?;

        Ok(Self {
            action,
            channel,
            continuation,
            workdir,
            target,
            target_args,
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Filesystem address of the controller's stream socket
    pub fn channel(&self) -> &Path {
        &self.channel
    }

    /// Opaque message shown at the final pause
    pub fn continuation(&self) -> &OsStr {
        &self.continuation
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Argument string handed to the target verbatim
    pub fn target_args(&self) -> &OsStr {
        &self.target_args
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
