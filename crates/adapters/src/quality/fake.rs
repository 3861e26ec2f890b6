// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted data-quality service for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CoverageReport, FreshnessReport, IngestionSummary, QualityAdapter};
use crate::GatewayError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded data-quality call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityCall {
    Ingestion,
    Coverage,
    Freshness,
}

struct Script {
    ingestion: Result<IngestionSummary, GatewayError>,
    coverage: Result<CoverageReport, GatewayError>,
    freshness: Result<FreshnessReport, GatewayError>,
}

/// Fake data-quality service.
///
/// Defaults to figures that clear the standard verify thresholds.
#[derive(Clone)]
pub struct FakeQualityAdapter {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<QualityCall>>>,
}

impl Default for FakeQualityAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeQualityAdapter {
    pub fn new() -> Self {
        let script = Script {
            ingestion: Ok(IngestionSummary {
                total_records: 1000,
                pass_rate: 0.95,
            }),
            coverage: Ok(CoverageReport {
                fields: [("title", 1.0), ("price", 0.9)]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }),
            freshness: Ok(FreshnessReport {
                avg_age_days: 2.0,
                stale_count: 0,
            }),
        };
        Self {
            script: Arc::new(Mutex::new(script)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: QualityCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<QualityCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_ingestion(&self, result: Result<IngestionSummary, GatewayError>) {
        self.script().ingestion = result;
    }

    pub fn set_coverage(&self, result: Result<CoverageReport, GatewayError>) {
        self.script().coverage = result;
    }

    pub fn set_freshness(&self, result: Result<FreshnessReport, GatewayError>) {
        self.script().freshness = result;
    }
}

#[async_trait]
impl QualityAdapter for FakeQualityAdapter {
    async fn ingestion_summary(&self) -> Result<IngestionSummary, GatewayError> {
        self.record(QualityCall::Ingestion);
        self.script().ingestion.clone()
    }

    async fn coverage(&self) -> Result<CoverageReport, GatewayError> {
        self.record(QualityCall::Coverage);
        self.script().coverage.clone()
    }

    async fn freshness(&self) -> Result<FreshnessReport, GatewayError> {
        self.record(QualityCall::Freshness);
        self.script().freshness.clone()
    }
}
