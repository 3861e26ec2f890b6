// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP data-quality adapter

use super::{CoverageReport, FreshnessReport, IngestionSummary, QualityAdapter};
use crate::http::JsonClient;
use crate::GatewayError;
use async_trait::async_trait;
use std::time::Duration;

/// Data-quality service reached over HTTP + JSON
#[derive(Clone, Debug)]
pub struct HttpQualityAdapter {
    http: JsonClient,
}

impl HttpQualityAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            http: JsonClient::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl QualityAdapter for HttpQualityAdapter {
    async fn ingestion_summary(&self) -> Result<IngestionSummary, GatewayError> {
        self.http.get("/data-quality/ingestion").await
    }

    async fn coverage(&self) -> Result<CoverageReport, GatewayError> {
        self.http.get("/data-quality/coverage").await
    }

    async fn freshness(&self) -> Result<FreshnessReport, GatewayError> {
        self.http.get("/data-quality/freshness").await
    }
}
