// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-quality service adapters

mod http;

pub use http::HttpQualityAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeQualityAdapter, QualityCall};

use crate::GatewayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ingestion validation summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionSummary {
    #[serde(default)]
    pub total_records: u64,
    /// Fraction of records that passed validation, 0.0 to 1.0
    pub pass_rate: f64,
}

/// Per-field population ratios
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    #[serde(default)]
    pub fields: BTreeMap<String, f64>,
}

impl CoverageReport {
    /// Mean ratio across all fields; 0.0 when there are none
    pub fn average(&self) -> f64 {
        if self.fields.is_empty() {
            return 0.0;
        }
        self.fields.values().sum::<f64>() / self.fields.len() as f64
    }
}

/// Record age summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessReport {
    pub avg_age_days: f64,
    #[serde(default)]
    pub stale_count: u64,
}

/// Adapter for the data-quality aggregation service
#[async_trait]
pub trait QualityAdapter: Clone + Send + Sync + 'static {
    async fn ingestion_summary(&self) -> Result<IngestionSummary, GatewayError>;

    async fn coverage(&self) -> Result<CoverageReport, GatewayError>;

    async fn freshness(&self) -> Result<FreshnessReport, GatewayError>;
}
