// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::gateway::{
    CrawlerGateway, CrawlerList, ServiceStatus, TaskHandle, TaskRequest, TaskStatus,
};
use crate::quality::{CoverageReport, FreshnessReport, IngestionSummary, QualityAdapter};
use crate::GatewayError;
use async_trait::async_trait;
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Await a remote call, logging its outcome and latency
async fn timed<T, F>(what: &'static str, call: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => tracing::debug!(elapsed_ms, "{} ok", what),
        Err(e) => tracing::warn!(elapsed_ms, error = %e, "{} failed", what),
    }
    result
}

/// Wrapper that adds tracing to any CrawlerGateway
#[derive(Clone)]
pub struct TracedGateway<G> {
    inner: G,
}

impl<G> TracedGateway<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: CrawlerGateway> CrawlerGateway for TracedGateway<G> {
    async fn health(&self) -> Result<ServiceStatus, GatewayError> {
        timed("health", self.inner.health())
            .instrument(tracing::info_span!("gateway.health"))
            .await
    }

    async fn readiness(&self) -> Result<ServiceStatus, GatewayError> {
        timed("readiness", self.inner.readiness())
            .instrument(tracing::info_span!("gateway.readiness"))
            .await
    }

    async fn list_crawlers(&self) -> Result<CrawlerList, GatewayError> {
        let span = tracing::info_span!("gateway.list_crawlers");
        let result = timed("list crawlers", self.inner.list_crawlers())
            .instrument(span.clone())
            .await;
        if let Ok(list) = &result {
            span.in_scope(|| tracing::debug!(total = list.total, "crawlers listed"));
        }
        result
    }

    async fn submit(&self, request: &TaskRequest) -> Result<TaskHandle, GatewayError> {
        let span = tracing::info_span!("gateway.submit", kind = request.kind().name());
        span.in_scope(|| tracing::info!(?request, "submitting"));
        let result = timed("submit", self.inner.submit(request))
            .instrument(span.clone())
            .await;
        if let Ok(handle) = &result {
            span.in_scope(|| tracing::info!(task_id = %handle.task_id, "task queued"));
        }
        result
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, GatewayError> {
        let result = self.inner.task_status(task_id).await;
        tracing::trace!(
            task_id,
            status = ?result.as_ref().map(|s| s.status).ok(),
            "polled"
        );
        result
    }
}

/// Wrapper that adds tracing to any QualityAdapter
#[derive(Clone)]
pub struct TracedQualityAdapter<Q> {
    inner: Q,
}

impl<Q> TracedQualityAdapter<Q> {
    pub fn new(inner: Q) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<Q: QualityAdapter> QualityAdapter for TracedQualityAdapter<Q> {
    async fn ingestion_summary(&self) -> Result<IngestionSummary, GatewayError> {
        timed("ingestion summary", self.inner.ingestion_summary())
            .instrument(tracing::info_span!("quality.ingestion"))
            .await
    }

    async fn coverage(&self) -> Result<CoverageReport, GatewayError> {
        timed("coverage", self.inner.coverage())
            .instrument(tracing::info_span!("quality.coverage"))
            .await
    }

    async fn freshness(&self) -> Result<FreshnessReport, GatewayError> {
        timed("freshness", self.inner.freshness())
            .instrument(tracing::info_span!("quality.freshness"))
            .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
