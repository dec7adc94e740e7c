// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary characteristics of the target, read from its header.

use nix::errno::Errno;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const ELF_MAGIC: &[u8] = b"\x7fELF";
const SCRIPT_MAGIC: &[u8] = b"#!";
/// Enough for `e_ident` plus `e_type` and `e_machine`
const HEADER_LEN: usize = 20;

#[cfg(target_arch = "x86_64")]
const HOST_MACHINE: Option<u16> = Some(62);
#[cfg(target_arch = "x86")]
const HOST_MACHINE: Option<u16> = Some(3);
#[cfg(target_arch = "aarch64")]
const HOST_MACHINE: Option<u16> = Some(183);
#[cfg(target_arch = "arm")]
const HOST_MACHINE: Option<u16> = Some(40);
#[cfg(target_arch = "riscv64")]
const HOST_MACHINE: Option<u16> = Some(243);
#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "x86",
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv64"
)))]
const HOST_MACHINE: Option<u16> = None;

/// Kind of executable the target is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppType {
    /// Host-architecture ELF image that runs in the stub's console
    Console,
    /// `#!` script hosted by an interpreter
    Script,
    /// ELF image for another architecture, hosted by an emulator
    Foreign,
}

/// How the target gets started and awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    /// Ordinary child with a synchronous wait
    Direct,
    /// New session reporting through a notification queue
    Session,
}

impl AppType {
    pub fn strategy(self) -> LaunchStrategy {
        match self {
            AppType::Console => LaunchStrategy::Direct,
            AppType::Script | AppType::Foreign => LaunchStrategy::Session,
        }
    }
}

/// Read the target's header and classify it.
pub fn query_app_type(path: &Path) -> io::Result<AppType> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    classify_header(&header)
}

/// Classify an executable header; unknown formats fail with `ENOEXEC`.
pub fn classify_header(header: &[u8]) -> io::Result<AppType> {
    if header.starts_with(SCRIPT_MAGIC) {
        return Ok(AppType::Script);
    }
    if header.starts_with(ELF_MAGIC) && header.len() >= HEADER_LEN {
        // EI_DATA: 1 = little endian, 2 = big endian
        let machine_bytes = [header[18], header[19]];
        let machine = match header[5] {
            2 => u16::from_be_bytes(machine_bytes),
            _ => u16::from_le_bytes(machine_bytes),
        };
        let native = HOST_MACHINE.map_or(true, |host| host == machine);
        return Ok(if native {
            AppType::Console
        } else {
            AppType::Foreign
        });
    }
    Err(io::Error::from(Errno::ENOEXEC))
}

#[cfg(test)]
#[path = "apptype_tests.rs"]
mod tests;
