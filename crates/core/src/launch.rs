// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied launch configuration

use crate::settings::PilotSettings;
use serde::{Deserialize, Serialize};

/// What to crawl in one run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub keywords: Vec<String>,
    /// Empty means every registered site
    #[serde(default)]
    pub sites: Vec<String>,
    pub limit_per_keyword: u32,
    #[serde(default)]
    pub dry_run: bool,
}

impl LaunchConfig {
    pub fn new(keywords: Vec<String>, sites: Vec<String>, limit_per_keyword: u32) -> Self {
        Self {
            keywords,
            sites,
            limit_per_keyword,
            dry_run: false,
        }
    }

    pub fn dry_run(self) -> Self {
        Self {
            dry_run: true,
            ..self
        }
    }

    /// Site and keyword used by the probe and pilot phases.
    ///
    /// Falls back to the configured defaults when the launch config names none.
    pub fn pilot_target(&self, defaults: &PilotSettings) -> (String, String) {
        let site = self
            .sites
            .first()
            .cloned()
            .unwrap_or_else(|| defaults.fallback_site.clone());
        let keyword = self
            .keywords
            .first()
            .cloned()
            .unwrap_or_else(|| defaults.fallback_keyword.clone());
        (site, keyword)
    }
}
