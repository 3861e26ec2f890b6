//! Argument and configuration error specs

use crate::prelude::*;

#[test]
fn run_requires_a_keyword() {
    Project::empty()
        .sluice()
        .args(&["run"])
        .fails()
        .code(2)
        .stderr_has("--keyword");
}

#[test]
fn missing_config_file_is_reported() {
    Project::empty()
        .sluice()
        .args(&["settings", "--config", "missing.toml"])
        .fails()
        .stderr_has("missing.toml");
}

#[test]
fn malformed_config_file_is_reported() {
    let temp = Project::empty();
    temp.file("sluice.toml", "[polling]\ninterval = \"soon\"\n");

    temp.sluice()
        .args(&["settings", "--config", "sluice.toml"])
        .fails()
        .stderr_has("sluice.toml");
}
