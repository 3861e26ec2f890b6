// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where effective settings come from

use anyhow::{Context, Result};
use clap::Args;
use sluice_core::Settings;
use std::path::PathBuf;

/// Settings file plus service URL overrides.
///
/// Precedence, highest first: flag, environment, file, built-in default.
#[derive(Args, Debug, Default)]
pub struct SettingsSource {
    /// TOML settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Crawling service base URL
    #[arg(long, env = "SLUICE_SERVICE_URL", value_name = "URL")]
    pub service_url: Option<String>,

    /// Data-quality service base URL (defaults to the service URL)
    #[arg(long, env = "SLUICE_QUALITY_URL", value_name = "URL")]
    pub quality_url: Option<String>,
}

impl SettingsSource {
    pub fn load(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(url) = &self.service_url {
            settings.service.base_url = url.clone();
        }
        if let Some(url) = &self.quality_url {
            settings.service.quality_url = Some(url.clone());
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file_or_overrides() {
        let settings = SettingsSource::default().load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn overrides_beat_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[service]\nbase_url = \"http://crawler:8000\"\nquality_url = \"http://quality:9000\""
        )
        .unwrap();

        let source = SettingsSource {
            config: Some(file.path().to_path_buf()),
            service_url: Some("http://override:8000".to_string()),
            quality_url: None,
        };
        let settings = source.load().unwrap();

        assert_eq!(settings.service.base_url, "http://override:8000");
        assert_eq!(
            settings.service.quality_url.as_deref(),
            Some("http://quality:9000")
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let source = SettingsSource {
            config: Some(PathBuf::from("/nonexistent/sluice.toml")),
            ..SettingsSource::default()
        };
        let err = source.load().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sluice.toml"));
    }
}
