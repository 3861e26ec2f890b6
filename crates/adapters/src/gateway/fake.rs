// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted crawling service for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    CrawlerGateway, CrawlerList, ServiceStatus, TaskHandle, TaskKind, TaskRequest, TaskState,
    TaskStatus,
};
use crate::GatewayError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Health,
    Readiness,
    ListCrawlers,
    Submit(TaskRequest),
    TaskStatus(String),
}

#[derive(Default)]
struct Script {
    health: Option<GatewayError>,
    readiness: Option<GatewayError>,
    crawlers: Vec<String>,
    list_error: Option<GatewayError>,
    submit_errors: HashMap<TaskKind, GatewayError>,
    /// Statuses returned by successive polls; the last one repeats
    statuses: HashMap<TaskKind, Vec<TaskStatus>>,
    hanging: HashSet<TaskKind>,
    tasks: HashMap<String, (TaskKind, usize)>,
    next_task: u64,
}

/// Fake crawling service.
///
/// Starts healthy with two registered crawlers, and every submitted task
/// reports `done` on its first poll.
#[derive(Clone)]
pub struct FakeGateway {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        let script = Script {
            crawlers: vec!["pchome".to_string(), "momo".to_string()],
            ..Script::default()
        };
        Self {
            script: Arc::new(Mutex::new(script)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: GatewayCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Requests passed to `submit`, in order
    pub fn submitted(&self) -> Vec<TaskRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Submit(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn fail_health(&self, error: GatewayError) {
        self.script().health = Some(error);
    }

    pub fn fail_readiness(&self, error: GatewayError) {
        self.script().readiness = Some(error);
    }

    pub fn set_crawlers(&self, crawlers: &[&str]) {
        self.script().crawlers = crawlers.iter().map(|c| c.to_string()).collect();
    }

    pub fn fail_list_crawlers(&self, error: GatewayError) {
        self.script().list_error = Some(error);
    }

    pub fn fail_submit(&self, kind: TaskKind, error: GatewayError) {
        self.script().submit_errors.insert(kind, error);
    }

    /// Script the statuses reported for tasks of `kind`
    pub fn set_statuses(&self, kind: TaskKind, statuses: Vec<TaskStatus>) {
        self.script().statuses.insert(kind, statuses);
    }

    /// Every poll of a `kind` task reports this state
    pub fn set_state(&self, kind: TaskKind, state: TaskState) {
        self.set_statuses(kind, vec![TaskStatus::new(state)]);
    }

    /// Status queries for `kind` tasks never return
    pub fn hang_status(&self, kind: TaskKind) {
        self.script().hanging.insert(kind);
    }
}

#[async_trait]
impl CrawlerGateway for FakeGateway {
    async fn health(&self) -> Result<ServiceStatus, GatewayError> {
        self.record(GatewayCall::Health);
        match self.script().health.clone() {
            Some(error) => Err(error),
            None => Ok(ServiceStatus {
                status: "ok".to_string(),
            }),
        }
    }

    async fn readiness(&self) -> Result<ServiceStatus, GatewayError> {
        self.record(GatewayCall::Readiness);
        match self.script().readiness.clone() {
            Some(error) => Err(error),
            None => Ok(ServiceStatus {
                status: "ready".to_string(),
            }),
        }
    }

    async fn list_crawlers(&self) -> Result<CrawlerList, GatewayError> {
        self.record(GatewayCall::ListCrawlers);
        let script = self.script();
        if let Some(error) = script.list_error.clone() {
            return Err(error);
        }
        Ok(CrawlerList {
            crawlers: script.crawlers.clone(),
            total: script.crawlers.len() as u64,
        })
    }

    async fn submit(&self, request: &TaskRequest) -> Result<TaskHandle, GatewayError> {
        self.record(GatewayCall::Submit(request.clone()));
        let mut script = self.script();
        let kind = request.kind();
        if let Some(error) = script.submit_errors.get(&kind) {
            return Err(error.clone());
        }
        script.next_task += 1;
        let task_id = format!("{}-{}", kind.name(), script.next_task);
        script.tasks.insert(task_id.clone(), (kind, 0));
        Ok(TaskHandle { task_id })
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskStatus, GatewayError> {
        self.record(GatewayCall::TaskStatus(task_id.to_string()));
        let scripted = {
            let mut script = self.script();
            match script.tasks.get(task_id).copied() {
                None => Some(Err(GatewayError::Status {
                    endpoint: format!("/tasks/{}", task_id),
                    status: 404,
                })),
                Some((kind, _)) if script.hanging.contains(&kind) => None,
                Some((kind, polls)) => {
                    script.tasks.insert(task_id.to_string(), (kind, polls + 1));
                    let status = script
                        .statuses
                        .get(&kind)
                        .and_then(|s| s.get(polls).or_else(|| s.last()))
                        .cloned()
                        .unwrap_or_else(|| TaskStatus::new(TaskState::Done));
                    Some(Ok(status))
                }
            }
        };
        match scripted {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
