//! Settings command specs

use crate::prelude::*;

#[test]
fn defaults_are_printed_as_toml() {
    Project::empty()
        .sluice()
        .args(&["settings"])
        .passes()
        .stdout_has("[service]")
        .stdout_has("base_url = \"http://127.0.0.1:8000\"")
        .stdout_has("[polling]")
        .stdout_has("interval = \"5s\"")
        .stdout_has("fallback_site = \"pchome\"")
        .stdout_has("min_pass_rate = 0.8");
}

#[test]
fn file_values_replace_defaults() {
    let temp = Project::empty();
    temp.file(
        "sluice.toml",
        "[polling]\ninterval = \"2s\"\n\n[pilot]\nfallback_site = \"momo\"\n",
    );

    temp.sluice()
        .args(&["settings", "--config", "sluice.toml"])
        .passes()
        .stdout_has("interval = \"2s\"")
        .stdout_has("fallback_site = \"momo\"")
        .stdout_has("batch_timeout = \"10m\"");
}

#[test]
fn environment_overrides_the_file() {
    let temp = Project::empty();
    temp.file("sluice.toml", "[service]\nbase_url = \"http://from-file:8000\"\n");

    temp.sluice()
        .args(&["settings", "--config", "sluice.toml"])
        .env("SLUICE_SERVICE_URL", "http://from-env:8000")
        .passes()
        .stdout_has("http://from-env:8000")
        .stdout_lacks("from-file");
}

#[test]
fn flag_overrides_the_environment() {
    Project::empty()
        .sluice()
        .args(&["settings", "--quality-url", "http://from-flag:9000"])
        .env("SLUICE_QUALITY_URL", "http://from-env:9000")
        .passes()
        .stdout_has("quality_url = \"http://from-flag:9000\"");
}
