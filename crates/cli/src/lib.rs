// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pstub: launch one program outside the controller's process tree,
//! report its pid and outcome, then wait for the user.

pub mod env;
pub mod halt;
pub mod logging;
pub mod supervisor;

pub use halt::pause_for_acknowledgment;
pub use supervisor::Supervisor;
