//! Runs against a service that is not there

use crate::prelude::*;

#[test]
fn unreachable_service_aborts_in_preflight() {
    Project::empty()
        .sluice()
        .args(&["run", "--keyword", "豆腐", "--service-url", DEAD_URL])
        .fails()
        .code(1)
        .stdout_has("[preflight]   FAIL Error")
        .stdout_has("run aborted")
        .stdout_has("probe      skipped");
}

#[test]
fn json_output_reports_aborted_state() {
    let output = Project::empty()
        .sluice()
        .args(&[
            "run",
            "--keyword",
            "豆腐",
            "--service-url",
            DEAD_URL,
            "--output",
            "json",
        ])
        .fails()
        .code(1);

    let state: serde_json::Value = serde_json::from_str(&output.stdout()).unwrap();
    assert_eq!(state["status"], "aborted");
    assert_eq!(state["phases"][0]["status"], "failed");
    assert_eq!(state["phases"][1]["status"], "skipped");
}
