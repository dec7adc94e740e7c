// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Library search path of the stub process.
//!
//! Directives rewrite the dynamic loader variable in the stub's own
//! environment. The target inherits the result, never the directives.

use pstub_core::{Directive, LibraryPathState};
use std::ffi::OsStr;
use std::io;

/// Loader variable searched for shared libraries
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(not(target_os = "macos"))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Applies directives to the process environment, once each
#[derive(Debug, Default)]
pub struct ProcessLibraryPath {
    state: Option<LibraryPathState>,
}

impl ProcessLibraryPath {
    pub fn extend(&mut self, directive: Directive, value: &OsStr) -> io::Result<()> {
        let state = self
            .state
            .get_or_insert_with(|| LibraryPathState::new(std::env::var_os(LIBRARY_PATH_VAR)));
        state
            .apply(directive, value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        match state.compose() {
            Some(path) => std::env::set_var(LIBRARY_PATH_VAR, path),
            None => std::env::remove_var(LIBRARY_PATH_VAR),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "libpath_tests.rs"]
mod tests;
