//! Complete runs through every phase

use crate::prelude::*;

#[test]
fn run_passes_every_phase_and_exits_zero() {
    let service = Service::start();
    let project = Project::empty();
    project.file("sluice.toml", FAST_POLLING);

    project
        .sluice()
        .args(&[
            "run",
            "-k",
            "豆腐",
            "-s",
            "momo",
            "--config",
            "sluice.toml",
            "--service-url",
            service.url(),
        ])
        .passes()
        .stdout_has("[probe] passed")
        .stdout_has("[pilot]   PASS Pilot completed: done")
        .stdout_has("[batch] passed")
        .stdout_has("[verify] passed")
        .stdout_has("run completed")
        .stdout_has("  verify     passed");

    let targets = service.targets();
    assert_eq!(
        &targets[3..],
        [
            "POST /tasks/probe",
            "GET /tasks/probe-1",
            "POST /tasks/search",
            "GET /tasks/search-2",
            "POST /tasks/batch",
            "GET /tasks/batch-3",
            "GET /data-quality/ingestion",
            "GET /data-quality/coverage",
            "GET /data-quality/freshness",
        ]
    );
}

#[test]
fn batch_request_carries_launch_config() {
    let service = Service::start();
    let project = Project::empty();
    project.file("sluice.toml", FAST_POLLING);

    project
        .sluice()
        .args(&[
            "run",
            "-k",
            "豆腐",
            "-k",
            "醬油",
            "-l",
            "25",
            "--config",
            "sluice.toml",
            "--service-url",
            service.url(),
        ])
        .passes();

    let (_, body) = service
        .requests()
        .into_iter()
        .find(|(target, _)| target == "POST /tasks/batch")
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["keywords"], serde_json::json!(["豆腐", "醬油"]));
    assert_eq!(body["limit_per_keyword"], 25);
}

#[test]
fn failed_batch_still_reaches_verify() {
    let service = Service::start();
    let mut failed = TaskStatus::new(TaskState::Failed);
    failed.error = Some("quota exceeded".to_string());
    service.set_task_status(TaskKind::Batch, failed);
    let project = Project::empty();
    project.file("sluice.toml", FAST_POLLING);

    project
        .sluice()
        .args(&[
            "run",
            "-k",
            "豆腐",
            "--config",
            "sluice.toml",
            "--service-url",
            service.url(),
        ])
        .passes()
        .stdout_has("[batch]   FAIL Batch completed: quota exceeded")
        .stdout_has("[batch] failed")
        .stdout_has("[verify] passed")
        .stdout_has("  batch      failed");
}
