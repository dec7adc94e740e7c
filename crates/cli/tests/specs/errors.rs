//! Error path specs
//!
//! Usage errors stay on stderr; setup failures after connecting are reported
//! to the controller as `err:<phase> <errno>`.

use crate::prelude::*;
use std::ffi::OsStr;

#[test]
fn five_arguments_is_usage_error_without_channel_io() {
    let ctl = Controller::new();
    let socket = ctl.socket();
    let stub = ctl.invoke(&[
        OsStr::new("run"),
        socket.as_os_str(),
        OsStr::new(CONTINUATION),
        ctl.dir().as_os_str(),
        OsStr::new("/bin/true"),
    ]);

    stub.finish()
        .exits_with(1)
        .stdout_is("")
        .stderr_has("Do not run it manually");
    assert!(ctl.no_connection());
}

#[test]
fn seven_arguments_is_usage_error_without_channel_io() {
    let ctl = Controller::new();
    let socket = ctl.socket();
    let stub = ctl.invoke(&[
        OsStr::new("run"),
        socket.as_os_str(),
        OsStr::new(CONTINUATION),
        ctl.dir().as_os_str(),
        OsStr::new("/bin/true"),
        OsStr::new(""),
        OsStr::new("extra"),
    ]);

    stub.finish().exits_with(1).stderr_has("usage:");
    assert!(ctl.no_connection());
}

#[test]
fn unreachable_channel_exits_one_after_pause() {
    let ctl = Controller::new();
    let missing = ctl.dir().join("nobody-listens.sock");
    let stub = ctl.invoke(&[
        OsStr::new("run"),
        missing.as_os_str(),
        OsStr::new(CONTINUATION),
        ctl.dir().as_os_str(),
        OsStr::new("/bin/true"),
        OsStr::new(""),
    ]);

    stub.acknowledge()
        .exits_with(1)
        .stdout_is(&format!("{CONTINUATION}\n"))
        .stderr_has("Cannot connect comm socket");
    assert!(ctl.no_connection());
}

#[test]
fn missing_workdir_reports_chdir_error() {
    let ctl = Controller::new();
    let stub = ctl.run(
        &ctl.dir().join("does-not-exist"),
        &system_binary("true"),
        "",
    );

    let conn = ctl.accept();
    assert_eq!(conn.rest(), "err:chdir 2\n");

    stub.acknowledge()
        .exits_with(1)
        .stdout_is(&format!("{CONTINUATION}\n"));
}

#[test]
fn missing_target_reports_exec_error() {
    let ctl = Controller::new();
    let stub = ctl.run(ctl.dir(), &ctl.dir().join("no-such-program"), "");

    let conn = ctl.accept();
    assert_eq!(conn.rest(), "err:exec 2\n");

    stub.acknowledge()
        .exits_with(3)
        .stderr_has("Unable to determine application type");
}

#[test]
fn unrecognized_binary_reports_enoexec() {
    let ctl = Controller::new();
    let target = ctl.script("data.bin", "plain text, not a program\n");
    let stub = ctl.run(ctl.dir(), &target, "");

    let conn = ctl.accept();
    assert_eq!(conn.rest(), format!("err:exec {}\n", nix::errno::Errno::ENOEXEC as i32));

    stub.acknowledge().exits_with(3);
}
