//! Interrupting a run in flight

use crate::prelude::*;

#[test]
#[cfg(unix)]
fn sigint_aborts_a_running_task() {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;
    use std::process::{Command as StdCommand, Stdio};

    let service = Service::start();
    service.set_task_status(TaskKind::Probe, TaskStatus::new(TaskState::Running));
    let project = Project::empty();
    project.file("sluice.toml", FAST_POLLING);

    let child = StdCommand::new(assert_cmd::cargo::cargo_bin("sluice"))
        .current_dir(project.path())
        .args([
            "run",
            "-k",
            "豆腐",
            "--config",
            "sluice.toml",
            "--service-url",
            service.url(),
        ])
        .env_remove("SLUICE_SERVICE_URL")
        .env_remove("SLUICE_QUALITY_URL")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sluice");

    service.wait_for("GET /tasks/probe-1");
    kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).expect("failed to send SIGINT");

    let output = child.wait_with_output().expect("failed to wait for sluice");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stdout:\n{stdout}\nstderr:\n{stderr}");
    assert!(stdout.contains("run aborted"), "stdout:\n{stdout}");
    assert!(stdout.contains("pilot      skipped"), "stdout:\n{stdout}");
    assert!(stderr.contains("Aborting run..."), "stderr:\n{stderr}");
}
