// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pause-for-acknowledgment before the stub exits.
//!
//! Keeps an interactively opened console around so the target's output can
//! still be read after it died.

use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::os::unix::ffi::OsStrExt;

/// Print the continuation message, then block for one line (or EOF) of input.
pub fn pause_for_acknowledgment<R, W>(
    continuation: &OsStr,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    output.write_all(continuation.as_bytes())?;
    output.write_all(b"\n")?;
    output.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(())
}

#[cfg(test)]
#[path = "halt_tests.rs"]
mod tests;
