// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process host for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use pstub_core::{Directive, RawTermination};

use super::{AppType, LaunchError, LaunchRequest, LaunchedChild, ProcessHost, WaitError};

/// Recorded host call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ChangeDir(PathBuf),
    QueryAppType(PathBuf),
    ExtendLibraryPath(Directive, OsString),
    LaunchDirect {
        target: PathBuf,
        args: OsString,
        env: Vec<(OsString, OsString)>,
    },
    LaunchSession {
        target: PathBuf,
        args: OsString,
        env: Vec<(OsString, OsString)>,
    },
}

/// Scripted child: fixed id, fixed termination result
#[derive(Debug)]
pub struct FakeChild {
    pub id: u32,
    pub termination: Result<RawTermination, io::ErrorKind>,
}

impl LaunchedChild for FakeChild {
    fn id(&self) -> u32 {
        self.id
    }

    fn wait_for_termination(self: Box<Self>) -> Result<RawTermination, WaitError> {
        self.termination.map_err(|kind| WaitError::Io(kind.into()))
    }
}

/// Result scripted for the next launch
#[derive(Debug)]
enum Scripted {
    Child(FakeChild),
    QueueFailure(i32),
    StartFailure(i32),
}

/// Fake process host for testing
#[derive(Debug)]
pub struct FakeHost {
    env: Vec<(OsString, OsString)>,
    app_type: Result<AppType, i32>,
    chdir_errno: Option<i32>,
    libpath_errno: Option<i32>,
    launches: VecDeque<Scripted>,
    calls: Vec<HostCall>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            env: Vec::new(),
            app_type: Ok(AppType::Console),
            chdir_errno: None,
            libpath_errno: None,
            launches: VecDeque::new(),
            calls: Vec::new(),
        }
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, vars: &[(&str, &str)]) -> Self {
        self.env = vars
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect();
        self
    }

    pub fn with_app_type(mut self, app_type: AppType) -> Self {
        self.app_type = Ok(app_type);
        self
    }

    pub fn failing_app_type(mut self, errno: i32) -> Self {
        self.app_type = Err(errno);
        self
    }

    pub fn failing_chdir(mut self, errno: i32) -> Self {
        self.chdir_errno = Some(errno);
        self
    }

    pub fn failing_library_path(mut self, errno: i32) -> Self {
        self.libpath_errno = Some(errno);
        self
    }

    /// Next launch yields a child that ends with `termination`
    pub fn with_child(mut self, id: u32, termination: RawTermination) -> Self {
        self.launches.push_back(Scripted::Child(FakeChild {
            id,
            termination: Ok(termination),
        }));
        self
    }

    /// Next launch yields a child whose wait fails
    pub fn with_lost_child(mut self, id: u32) -> Self {
        self.launches.push_back(Scripted::Child(FakeChild {
            id,
            termination: Err(io::ErrorKind::UnexpectedEof),
        }));
        self
    }

    pub fn failing_start(mut self, errno: i32) -> Self {
        self.launches.push_back(Scripted::StartFailure(errno));
        self
    }

    pub fn failing_queue(mut self, errno: i32) -> Self {
        self.launches.push_back(Scripted::QueueFailure(errno));
        self
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    fn next_launch(&mut self) -> Result<Box<dyn LaunchedChild>, LaunchError> {
        match self.launches.pop_front() {
            Some(Scripted::Child(child)) => Ok(Box::new(child)),
            Some(Scripted::QueueFailure(errno)) => Err(LaunchError::QueueCreate {
                queue: PathBuf::from("/fake/pstub-term.0"),
                source: io::Error::from_raw_os_error(errno),
            }),
            Some(Scripted::StartFailure(errno)) => Err(LaunchError::Start {
                source: io::Error::from_raw_os_error(errno),
            }),
            None => Err(LaunchError::Start {
                source: io::Error::other("no launch scripted"),
            }),
        }
    }
}

impl ProcessHost for FakeHost {
    fn change_dir(&mut self, dir: &Path) -> io::Result<()> {
        self.calls.push(HostCall::ChangeDir(dir.to_path_buf()));
        match self.chdir_errno {
            Some(errno) => Err(io::Error::from_raw_os_error(errno)),
            None => Ok(()),
        }
    }

    fn query_app_type(&mut self, target: &Path) -> io::Result<AppType> {
        self.calls.push(HostCall::QueryAppType(target.to_path_buf()));
        self.app_type.map_err(io::Error::from_raw_os_error)
    }

    fn environment(&mut self) -> Vec<(OsString, OsString)> {
        self.env.clone()
    }

    fn extend_library_path(&mut self, directive: Directive, value: &OsStr) -> io::Result<()> {
        self.calls
            .push(HostCall::ExtendLibraryPath(directive, value.to_os_string()));
        match self.libpath_errno {
            Some(errno) => Err(io::Error::from_raw_os_error(errno)),
            None => Ok(()),
        }
    }

    fn launch_direct(
        &mut self,
        req: &LaunchRequest<'_>,
    ) -> Result<Box<dyn LaunchedChild>, LaunchError> {
        self.calls.push(HostCall::LaunchDirect {
            target: req.target.to_path_buf(),
            args: req.args.to_os_string(),
            env: req.env.vars().to_vec(),
        });
        self.next_launch()
    }

    fn launch_session(
        &mut self,
        req: &LaunchRequest<'_>,
    ) -> Result<Box<dyn LaunchedChild>, LaunchError> {
        self.calls.push(HostCall::LaunchSession {
            target: req.target.to_path_buf(),
            args: req.args.to_os_string(),
            env: req.env.vars().to_vec(),
        });
        self.next_launch()
    }
}
