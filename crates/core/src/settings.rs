// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator settings
//!
//! Loaded from TOML. Every field has a default so a partial file (or no
//! file at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service: ServiceSettings,
    pub polling: PollSettings,
    pub pilot: PilotSettings,
    pub verify: VerifyThresholds,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Where the crawling and data-quality services live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub base_url: String,
    /// Data-quality service; defaults to `base_url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_url: Option<String>,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl ServiceSettings {
    pub fn quality_base(&self) -> &str {
        self.quality_url.as_deref().unwrap_or(&self.base_url)
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            quality_url: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Task polling cadence and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Limit for probe and pilot tasks
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub batch_timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(5 * 60),
            batch_timeout: Duration::from_secs(10 * 60),
        }
    }
}

/// Targets used when the launch config leaves the pilot unspecified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotSettings {
    pub fallback_site: String,
    pub fallback_keyword: String,
    /// Item limit of the pilot search
    pub limit: u32,
}

impl Default for PilotSettings {
    fn default() -> Self {
        Self {
            fallback_site: "pchome".to_string(),
            fallback_keyword: "豆腐".to_string(),
            limit: 3,
        }
    }
}

/// Thresholds for the verify phase checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyThresholds {
    /// Ingestion pass rate must exceed this
    pub min_pass_rate: f64,
    /// Mean field coverage must exceed this
    pub min_coverage: f64,
    /// Mean record age must stay below this
    pub max_age_days: f64,
}

impl Default for VerifyThresholds {
    fn default() -> Self {
        Self {
            min_pass_rate: 0.8,
            min_coverage: 0.5,
            max_age_days: 30.0,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
