// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pstub-core: pure types for the process stub (no I/O)

pub mod environment;
pub mod exit;
pub mod invocation;
pub mod message;
pub mod termination;

pub use environment::{
    compose_library_path, ChildEnvironment, Directive, DirectiveSet, LibraryPathState,
    StrictnessError,
};
pub use exit::StubExit;
pub use invocation::{Action, Invocation, UsageError, USAGE};
pub use message::{os_code, Message, Phase};
pub use termination::{classify, CrashCause, Outcome, RawTermination, TerminationCause};
