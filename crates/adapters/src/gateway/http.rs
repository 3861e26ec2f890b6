// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP crawling service adapter

use super::{CrawlerGateway, CrawlerList, ServiceStatus, TaskHandle, TaskKind, TaskRequest, TaskStatus};
use crate::http::JsonClient;
use crate::GatewayError;
use async_trait::async_trait;
use std::time::Duration;

/// Crawling service reached over HTTP + JSON
#[derive(Clone, Debug)]
pub struct HttpGateway {
    http: JsonClient,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            http: JsonClient::new(base_url, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

fn submit_path(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Probe => "/tasks/probe",
        TaskKind::Search => "/tasks/search",
        TaskKind::Batch => "/tasks/batch",
    }
}

#[async_trait]
impl CrawlerGateway for HttpGateway {
    async fn health(&self) -> Result<ServiceStatus, GatewayError> {
        self.http.get("/health").await
    }

    async fn readiness(&self) -> Result<ServiceStatus, GatewayError> {
        self.http.get("/health/ready").await
    }

    async fn list_crawlers(&self) -> Result<CrawlerList, GatewayError> {
        self.http.get("/crawlers").await
    }

    async fn submit(&self, request: &TaskRequest) -> Result<TaskHandle, GatewayError> {
        self.http.post(submit_path(request.kind()), request).await
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, GatewayError> {
        self.http.get(&format!("/tasks/{}", task_id)).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
