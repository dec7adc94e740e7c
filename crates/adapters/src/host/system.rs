// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process host backed by the real OS

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use pstub_core::Directive;

use super::libpath::ProcessLibraryPath;
use super::{direct, session};
use super::{AppType, LaunchError, LaunchRequest, LaunchedChild, ProcessHost};

#[derive(Debug)]
pub struct SystemHost {
    queue_dir: PathBuf,
    library_path: ProcessLibraryPath,
}

impl SystemHost {
    /// Host whose session queues live in `queue_dir`
    pub fn new(queue_dir: impl Into<PathBuf>) -> Self {
        Self {
            queue_dir: queue_dir.into(),
            library_path: ProcessLibraryPath::default(),
        }
    }
}

impl ProcessHost for SystemHost {
    fn change_dir(&mut self, dir: &Path) -> std::io::Result<()> {
        std::env::set_current_dir(dir)
    }

    fn query_app_type(&mut self, target: &Path) -> std::io::Result<AppType> {
        super::query_app_type(target)
    }

    fn environment(&mut self) -> Vec<(OsString, OsString)> {
        std::env::vars_os().collect()
    }

    fn extend_library_path(&mut self, directive: Directive, value: &OsStr) -> std::io::Result<()> {
        self.library_path.extend(directive, value)
    }

    fn launch_direct(
        &mut self,
        req: &LaunchRequest<'_>,
    ) -> Result<Box<dyn LaunchedChild>, LaunchError> {
        Ok(Box::new(direct::launch(req)?))
    }

    fn launch_session(
        &mut self,
        req: &LaunchRequest<'_>,
    ) -> Result<Box<dyn LaunchedChild>, LaunchError> {
        Ok(Box::new(session::launch(req, &self.queue_dir)?))
    }
}
