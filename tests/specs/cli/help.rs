//! Help output specs

use crate::prelude::*;

#[test]
fn top_level_help_lists_commands() {
    Project::empty()
        .sluice()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("settings");
}

#[test]
fn run_help_lists_launch_options() {
    Project::empty()
        .sluice()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--keyword")
        .stdout_has("--site")
        .stdout_has("--limit")
        .stdout_has("--dry-run")
        .stdout_has("SLUICE_SERVICE_URL");
}

#[test]
fn completions_are_generated() {
    Project::empty()
        .sluice()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("sluice");
}
