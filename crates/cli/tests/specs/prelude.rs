//! Test helpers for behavioral specifications.
//!
//! Provides a fake controller that listens on a Unix socket and drives the stub.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub use nix::sys::signal::Signal;
use nix::unistd::Pid;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

pub const CONTINUATION: &str = "Press <RETURN> to close this window...";

/// Path to the built stub binary
pub fn stub_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pstub"))
}

/// First existing path among candidates (e.g. `/bin/true` vs `/usr/bin/true`)
pub fn find_system_binary(name: &str) -> Option<PathBuf> {
    ["/bin", "/usr/bin"]
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|p| p.exists())
}

pub fn system_binary(name: &str) -> PathBuf {
    find_system_binary(name).unwrap_or_else(|| panic!("{name} not found in /bin or /usr/bin"))
}

/// Quote one word for `sh -c`
fn shell_quote(word: &OsStr) -> String {
    format!("'{}'", word.to_string_lossy().replace('\'', "'\\''"))
}

/// Controller side of the protocol: a listening socket in a scratch directory
pub struct Controller {
    dir: tempfile::TempDir,
    listener: UnixListener,
}

impl Controller {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let listener = UnixListener::bind(dir.path().join("ctl.sock")).unwrap();
        listener.set_nonblocking(true).unwrap();
        Self { dir, listener }
    }

    pub fn socket(&self) -> PathBuf {
        self.dir.path().join("ctl.sock")
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable file into the scratch directory
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Invoke `pstub run <socket> <continuation> <workdir> <target> <args>`
    pub fn run(&self, workdir: &Path, target: &Path, args: &str) -> Stub {
        let socket = self.socket();
        self.invoke(&[
            OsStr::new("run"),
            socket.as_os_str(),
            OsStr::new(CONTINUATION),
            workdir.as_os_str(),
            target.as_os_str(),
            OsStr::new(args),
        ])
    }

    /// Invoke the stub with raw arguments
    pub fn invoke(&self, args: &[&OsStr]) -> Stub {
        let child = Command::new(stub_binary())
            .args(args)
            .env("PSTUB_QUEUE_DIR", self.dir.path())
            .env_remove("PSTUB_LOG_FILE")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        Stub { child }
    }

    /// Invoke `pstub run ...` on a pseudo-terminal through the util-linux
    /// `script` wrapper, so the stub has a controlling console.
    pub fn run_on_console(&self, script: &Path, workdir: &Path, target: &Path, args: &str) -> Stub {
        let socket = self.socket();
        let stub = stub_binary();
        let words = [
            stub.as_os_str(),
            OsStr::new("run"),
            socket.as_os_str(),
            OsStr::new(CONTINUATION),
            workdir.as_os_str(),
            target.as_os_str(),
            OsStr::new(args),
        ];
        let command_line = words
            .iter()
            .map(|w| shell_quote(w))
            .collect::<Vec<_>>()
            .join(" ");

        let child = Command::new(script)
            .args(["-q", "-e", "-c"])
            .arg(command_line)
            .arg("/dev/null")
            .env("PSTUB_QUEUE_DIR", self.dir.path())
            .env_remove("PSTUB_LOG_FILE")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        Stub { child }
    }

    /// Wait for the stub to connect
    pub fn accept(&self) -> Connection {
        let start = Instant::now();
        loop {
            match self.listener.accept() {
                Ok((stream, _)) => {
                    stream.set_nonblocking(false).unwrap();
                    stream
                        .set_read_timeout(Some(Duration::from_millis(SPEC_WAIT_MAX_MS)))
                        .unwrap();
                    return Connection {
                        reader: BufReader::new(stream),
                    };
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if start.elapsed() > Duration::from_millis(SPEC_WAIT_MAX_MS) {
                        panic!("stub never connected");
                    }
                    std::thread::sleep(Duration::from_millis(SPEC_POLL_INTERVAL_MS));
                }
                Err(e) => panic!("accept failed: {e}"),
            }
        }
    }

    /// True if no connection is pending
    pub fn no_connection(&self) -> bool {
        matches!(
            self.listener.accept(),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock
        )
    }
}

/// One accepted channel connection
pub struct Connection {
    reader: BufReader<UnixStream>,
}

impl Connection {
    /// Next message line without its newline
    pub fn line(&mut self) -> String {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).unwrap();
        assert!(n > 0, "channel closed before a message arrived");
        assert!(line.ends_with('\n'), "message not newline-terminated: {line:?}");
        line.pop();
        line
    }

    /// Numeric payload of a `pid <n>` line
    pub fn pid(&mut self) -> u32 {
        let line = self.line();
        let pid = line
            .strip_prefix("pid ")
            .unwrap_or_else(|| panic!("expected pid message, got {line:?}"));
        pid.parse().unwrap()
    }

    /// Everything until the stub closes the channel
    pub fn rest(mut self) -> String {
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut self.reader, &mut rest).unwrap();
        rest
    }
}

/// Running stub process
pub struct Stub {
    child: Child,
}

impl Stub {
    /// Type one line on the stub's input
    pub fn type_line(&mut self, text: &str) {
        let stdin = self.child.stdin.as_mut().unwrap();
        stdin.write_all(text.as_bytes()).unwrap();
        stdin.write_all(b"\n").unwrap();
        stdin.flush().unwrap();
    }

    /// Answer the final pause and collect the result
    pub fn acknowledge(mut self) -> Finished {
        if let Some(mut stdin) = self.child.stdin.take() {
            // The stub may already be gone on early-exit paths
            let _ = stdin.write_all(b"\n");
        }
        self.finish()
    }

    pub fn finish(self) -> Finished {
        Finished {
            output: self.child.wait_with_output().unwrap(),
        }
    }
}

/// Completed stub with assertion helpers
pub struct Finished {
    output: Output,
}

impl Finished {
    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn exits_with(self, code: i32) -> Self {
        assert_eq!(
            self.code(),
            Some(code),
            "stderr: {}",
            String::from_utf8_lossy(&self.output.stderr)
        );
        self
    }

    pub fn stdout_is(self, expected: &str) -> Self {
        assert_eq!(String::from_utf8_lossy(&self.output.stdout), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(stderr.contains(needle), "stderr {stderr:?} lacks {needle:?}");
        self
    }

    pub fn stderr_is_empty(self) -> Self {
        assert!(
            self.output.stderr.is_empty(),
            "stderr: {}",
            String::from_utf8_lossy(&self.output.stderr)
        );
        self
    }
}

/// Send `signal` to the target the stub reported
pub fn kill(signal: Signal, pid: u32) {
    nix::sys::signal::kill(Pid::from_raw(pid as i32), signal).unwrap();
}
