//! Direct launch specs
//!
//! Native executables run as ordinary children; the stub reports their pid,
//! then their exit code or crash class, then waits for the user.

use crate::prelude::*;

#[test]
fn true_reports_pid_then_exit_zero() {
    let ctl = Controller::new();
    let stub = ctl.run(ctl.dir(), &system_binary("true"), "");

    let mut conn = ctl.accept();
    assert!(conn.pid() > 0);
    assert_eq!(conn.line(), "exit 0");
    assert_eq!(conn.rest(), "");

    stub.acknowledge()
        .exits_with(0)
        .stdout_is(&format!("{CONTINUATION}\n"))
        .stderr_is_empty();
}

#[test]
fn exit_code_is_passed_through_channel_not_process() {
    let ctl = Controller::new();
    let body = ctl.script("body.sh", "exit 5\n");
    let stub = ctl.run(ctl.dir(), &system_binary("sh"), body.to_str().unwrap());

    let mut conn = ctl.accept();
    conn.pid();
    assert_eq!(conn.line(), "exit 5");

    stub.acknowledge().exits_with(0);
}

#[test]
fn target_runs_in_working_directory() {
    let ctl = Controller::new();
    let work = ctl.dir().join("work");
    std::fs::create_dir(&work).unwrap();
    let body = ctl.script("body.sh", "test -f marker || exit 9\nexit 0\n");
    std::fs::write(work.join("marker"), "").unwrap();

    let stub = ctl.run(&work, &system_binary("sh"), body.to_str().unwrap());

    let mut conn = ctl.accept();
    conn.pid();
    assert_eq!(conn.line(), "exit 0");
    stub.acknowledge().exits_with(0);
}

#[test]
fn sigkill_reports_killed_crash() {
    let ctl = Controller::new();
    let stub = ctl.run(ctl.dir(), &system_binary("sleep"), "30");

    let mut conn = ctl.accept();
    let pid = conn.pid();
    kill(Signal::SIGKILL, pid);
    assert_eq!(conn.line(), "crash 9");

    stub.acknowledge().exits_with(0);
}

#[test]
fn sigsegv_reports_segfault_crash() {
    let ctl = Controller::new();
    let stub = ctl.run(ctl.dir(), &system_binary("sleep"), "30");

    let mut conn = ctl.accept();
    let pid = conn.pid();
    kill(Signal::SIGSEGV, pid);
    assert_eq!(conn.line(), "crash 11");

    stub.acknowledge().exits_with(0);
}

#[test]
fn directives_do_not_reach_the_target() {
    let ctl = Controller::new();
    let body = ctl.script(
        "body.sh",
        "test -z \"$PSTUB_BEGINLIBPATH\" || exit 1\n\
         test -z \"$PSTUB_ENDLIBPATH\" || exit 2\n\
         test \"$KEEP_ME\" = yes || exit 3\n\
         case \"$LD_LIBRARY_PATH\" in /opt/first*) ;; *) exit 4 ;; esac\n\
         exit 0\n",
    );

    let socket = ctl.socket();
    let sh = system_binary("sh");
    let child = std::process::Command::new(stub_binary())
        .args([
            std::ffi::OsStr::new("run"),
            socket.as_os_str(),
            std::ffi::OsStr::new(CONTINUATION),
            ctl.dir().as_os_str(),
            sh.as_os_str(),
            body.as_os_str(),
        ])
        .env("PSTUB_BEGINLIBPATH", "/opt/first")
        .env("PSTUB_ENDLIBPATH", "/opt/last")
        .env("KEEP_ME", "yes")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .unwrap();

    let mut conn = ctl.accept();
    conn.pid();
    assert_eq!(conn.line(), "exit 0");

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}
