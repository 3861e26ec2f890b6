// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crawling service adapters

mod http;

pub use http::HttpGateway;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGateway, GatewayCall};

use crate::GatewayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of the health and readiness endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
}

/// Registered crawlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerList {
    #[serde(default)]
    pub crawlers: Vec<String>,
    pub total: u64,
}

/// Reference to a submitted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

/// Remote task lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Queued,
    Running,
    Done,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Done | TaskState::Failed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskState::Queued => "queued",
            TaskState::Running => "running",
            TaskState::Done => "done",
            TaskState::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One answer from the task status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskStatus {
    pub fn new(status: TaskState) -> Self {
        Self {
            status,
            result: None,
            error: None,
        }
    }
}

/// Which kind of crawl a task request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Probe,
    Search,
    Batch,
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Probe => "probe",
            TaskKind::Search => "search",
            TaskKind::Batch => "batch",
        }
    }
}

/// Parameters of a task submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskRequest {
    /// Lightweight liveness crawl of one site
    Probe { site: String },
    /// Small search on one site
    Search {
        site: String,
        keyword: String,
        limit: u32,
    },
    /// Full crawl; empty `sites` means every registered site
    Batch {
        keywords: Vec<String>,
        sites: Vec<String>,
        limit_per_keyword: u32,
    },
}

impl TaskRequest {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::Probe { .. } => TaskKind::Probe,
            TaskRequest::Search { .. } => TaskKind::Search,
            TaskRequest::Batch { .. } => TaskKind::Batch,
        }
    }
}

/// Adapter for the remote crawling service
#[async_trait]
pub trait CrawlerGateway: Clone + Send + Sync + 'static {
    /// Liveness endpoint
    async fn health(&self) -> Result<ServiceStatus, GatewayError>;

    /// Readiness endpoint
    async fn readiness(&self) -> Result<ServiceStatus, GatewayError>;

    /// Crawler registry
    async fn list_crawlers(&self) -> Result<CrawlerList, GatewayError>;

    /// Queue a task; execution happens asynchronously on the service
    async fn submit(&self, request: &TaskRequest) -> Result<TaskHandle, GatewayError>;

    /// Current status of a submitted task
    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, GatewayError>;
}
