// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Library-path directives and the child's sanitized environment.
//!
//! Three reserved variables steer the dynamic loader search path of the
//! stub itself. They are applied once, then stripped so the target never
//! sees them. Everything else passes through untouched.

use std::ffi::{OsStr, OsString};
use thiserror::Error;

/// Reserved variable that steers the library search path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Prepend to the search path
    BeginLibPath,
    /// Append to the search path
    EndLibPath,
    /// `T` drops the inherited search path, `F` keeps it
    LibPathStrict,
}

impl Directive {
    /// All directives, in application order
    pub const ALL: [Directive; 3] = [
        Directive::BeginLibPath,
        Directive::EndLibPath,
        Directive::LibPathStrict,
    ];

    pub fn var_name(self) -> &'static str {
        match self {
            Directive::BeginLibPath => "PSTUB_BEGINLIBPATH",
            Directive::EndLibPath => "PSTUB_ENDLIBPATH",
            Directive::LibPathStrict => "PSTUB_LIBPATHSTRICT",
        }
    }

    /// Exact, case-sensitive match against a variable name
    pub fn from_var_name(name: &OsStr) -> Option<Self> {
        Self::ALL.into_iter().find(|d| name == d.var_name())
    }
}

/// Directive values found in an environment snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    entries: Vec<(Directive, OsString)>,
}

impl DirectiveSet {
    pub fn from_vars<'a, I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (&'a OsStr, &'a OsStr)>,
    {
        let mut entries: Vec<(Directive, OsString)> = vars
            .into_iter()
            .filter_map(|(k, v)| Directive::from_var_name(k).map(|d| (d, v.to_os_string())))
            .collect();
        entries.sort_by_key(|(d, _)| Directive::ALL.iter().position(|x| x == d));
        entries.dedup_by_key(|(d, _)| *d);
        Self { entries }
    }

    /// Present directives in application order
    pub fn iter(&self) -> impl Iterator<Item = (Directive, &OsStr)> {
        self.entries.iter().map(|(d, v)| (*d, v.as_os_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid strictness flag {0:?}, expected T or F")]
pub struct StrictnessError(pub String);

/// Running state of the stub's own library search path.
///
/// Each directive updates one field; [`LibraryPathState::compose`] yields the
/// value to install after every update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryPathState {
    inherited: Option<OsString>,
    begin: Option<OsString>,
    end: Option<OsString>,
    strict: bool,
}

impl LibraryPathState {
    pub fn new(inherited: Option<OsString>) -> Self {
        Self {
            inherited,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, directive: Directive, value: &OsStr) -> Result<(), StrictnessError> {
        match directive {
            Directive::BeginLibPath => self.begin = Some(value.to_os_string()),
            Directive::EndLibPath => self.end = Some(value.to_os_string()),
            Directive::LibPathStrict => {
                self.strict = match value.to_str() {
                    Some("T" | "t") => true,
                    Some("F" | "f") => false,
                    _ => return Err(StrictnessError(value.to_string_lossy().into_owned())),
                }
            }
        }
        Ok(())
    }

    pub fn compose(&self) -> Option<OsString> {
        compose_library_path(
            self.begin.as_deref(),
            self.inherited.as_deref(),
            self.end.as_deref(),
            self.strict,
        )
    }
}

/// Join `begin : inherited : end`, skipping empty parts.
///
/// Strict mode leaves out the inherited part. Returns `None` when nothing remains.
pub fn compose_library_path(
    begin: Option<&OsStr>,
    inherited: Option<&OsStr>,
    end: Option<&OsStr>,
    strict: bool,
) -> Option<OsString> {
    let inherited = if strict { None } else { inherited };
    let parts: Vec<&OsStr> = [begin, inherited, end]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }

    let mut joined = OsString::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            joined.push(":");
        }
        joined.push(part);
    }
    Some(joined)
}

/// Environment block handed to the child. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildEnvironment {
    vars: Vec<(OsString, OsString)>,
}

impl ChildEnvironment {
    /// Copy every variable except the reserved directives.
    pub fn sanitize<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars
            .into_iter()
            .filter(|(name, _)| Directive::from_var_name(name).is_none())
            .collect();
        Self { vars }
    }

    pub fn vars(&self) -> &[(OsString, OsString)] {
        &self.vars
    }

    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_os_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
