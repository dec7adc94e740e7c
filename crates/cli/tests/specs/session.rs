//! Session launch specs
//!
//! Scripts start in their own session; the outcome arrives through the
//! notification queue and carries only a result code.

use crate::prelude::*;

#[test]
fn script_reports_pid_then_exit_code() {
    let ctl = Controller::new();
    let target = ctl.script("target.sh", "#!/bin/sh\nexit 7\n");
    let stub = ctl.run(ctl.dir(), &target, "");

    let mut conn = ctl.accept();
    assert!(conn.pid() > 0);
    assert_eq!(conn.line(), "exit 7");

    stub.acknowledge().exits_with(0);
}

#[test]
fn killed_script_still_reports_exit() {
    let ctl = Controller::new();
    let target = ctl.script("target.sh", "#!/bin/sh\nexec sleep 30\n");
    let stub = ctl.run(ctl.dir(), &target, "");

    let mut conn = ctl.accept();
    let pid = conn.pid();
    kill(Signal::SIGKILL, pid);
    assert_eq!(conn.line(), "exit 137");

    stub.acknowledge().exits_with(0);
}

#[test]
fn queue_is_removed_after_read() {
    let ctl = Controller::new();
    let target = ctl.script("target.sh", "#!/bin/sh\nexit 0\n");
    let stub = ctl.run(ctl.dir(), &target, "");

    let mut conn = ctl.accept();
    conn.pid();
    assert_eq!(conn.line(), "exit 0");
    stub.acknowledge().exits_with(0);

    let leftovers: Vec<_> = std::fs::read_dir(ctl.dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("pstub-term."))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(target_os = "linux")]
#[test]
fn script_reads_input_from_the_console() {
    let Some(console) = find_system_binary("script") else {
        eprintln!("skipping: no `script` utility to provide a console");
        return;
    };
    let ctl = Controller::new();
    let target = ctl.script(
        "target.sh",
        "#!/bin/sh\nread line\ntest \"$line\" = hello || exit 5\nexit 4\n",
    );
    let mut stub = ctl.run_on_console(&console, ctl.dir(), &target, "");

    let mut conn = ctl.accept();
    conn.pid();
    stub.type_line("hello");
    assert_eq!(conn.line(), "exit 4");

    stub.acknowledge().exits_with(0);
}
