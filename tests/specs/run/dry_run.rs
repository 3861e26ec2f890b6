//! Dry runs against a scripted service

use crate::prelude::*;

#[test]
fn dry_run_completes_after_preflight() {
    let service = Service::start();

    Project::empty()
        .sluice()
        .args(&[
            "run",
            "--keyword",
            "豆腐",
            "--dry-run",
            "--service-url",
            service.url(),
        ])
        .passes()
        .stdout_has("(dry run)")
        .stdout_has("[preflight]   PASS Crawlers registered: 2 crawlers")
        .stdout_has("run completed")
        .stdout_has("probe      pending");

    assert_eq!(
        service.targets(),
        vec!["GET /health", "GET /health/ready", "GET /crawlers"]
    );
}

#[test]
fn dry_run_with_no_crawlers_aborts() {
    let service = Service::start();
    service.set_crawlers(&[]);

    Project::empty()
        .sluice()
        .args(&[
            "run",
            "-k",
            "豆腐",
            "--dry-run",
            "--service-url",
            service.url(),
        ])
        .fails()
        .code(1)
        .stdout_has("FAIL Crawlers registered: 0 crawlers")
        .stdout_has("run aborted");
}

#[test]
fn service_url_can_come_from_the_environment() {
    let service = Service::start();
    service.set_crawlers(&["pchome"]);

    Project::empty()
        .sluice()
        .args(&["run", "-k", "豆腐", "--dry-run"])
        .env("SLUICE_SERVICE_URL", service.url())
        .passes()
        .stdout_has("run completed");
}
