// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted crawling and data-quality service served over real HTTP
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::gateway::{TaskKind, TaskState, TaskStatus};
use axum::extract::{Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const KINDS: [TaskKind; 3] = [TaskKind::Probe, TaskKind::Search, TaskKind::Batch];

struct Script {
    /// Fixed answers by path, taking precedence over the built-in routes
    fixed: HashMap<String, (u16, String)>,
    crawlers: Vec<String>,
    statuses: HashMap<TaskKind, TaskStatus>,
    quality: HashMap<&'static str, Value>,
    tasks: HashMap<String, TaskKind>,
    next_task: u64,
    requests: Vec<(String, String)>,
}

impl Default for Script {
    fn default() -> Self {
        let quality = [
            (
                "ingestion",
                json!({"total_records": 1000, "pass_rate": 0.95}),
            ),
            ("coverage", json!({"fields": {"title": 1.0, "price": 0.9}})),
            ("freshness", json!({"avg_age_days": 2.0, "stale_count": 0})),
        ];
        Self {
            fixed: HashMap::new(),
            crawlers: vec!["pchome".to_string(), "momo".to_string()],
            statuses: HashMap::new(),
            quality: quality.into_iter().collect(),
            tasks: HashMap::new(),
            next_task: 0,
            requests: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<Script>>;

/// Fake remote services on a loopback port.
///
/// Serves the crawling endpoints and the `/data-quality/*` reports from one
/// router. Starts healthy with two crawlers, every task reports `done`, and
/// the quality figures clear the default verify thresholds.
#[derive(Clone)]
pub struct FakeService {
    url: String,
    script: Shared,
}

impl FakeService {
    /// Bind `127.0.0.1:0` and serve on the current tokio runtime
    pub async fn start() -> std::io::Result<Self> {
        let script = Shared::default();
        let router = Router::new()
            .route("/health", get(health))
            .route("/health/ready", get(readiness))
            .route("/crawlers", get(crawlers))
            .route("/tasks/{name}", get(task_status).post(submit))
            .route("/data-quality/{report}", get(quality))
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::warn!(error = %e, "fake service stopped");
            }
        });

        Ok(Self { url, script })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer every request for `path` with this status and raw body
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.script()
            .fixed
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn set_crawlers(&self, crawlers: &[&str]) {
        self.script().crawlers = crawlers.iter().map(|c| c.to_string()).collect();
    }

    /// Every poll of a `kind` task reports this status
    pub fn set_task_status(&self, kind: TaskKind, status: TaskStatus) {
        self.script().statuses.insert(kind, status);
    }

    /// Requests received so far as ("METHOD /path", body)
    pub fn requests(&self) -> Vec<(String, String)> {
        self.script().requests.clone()
    }

    /// Request targets only, e.g. "GET /health"
    pub fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|(t, _)| t).collect()
    }
}

fn json_reply(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Record the request, then answer with a fixed reply or the built-in one
fn reply(
    script: &Shared,
    method: Method,
    path: String,
    body: String,
    route: impl FnOnce(&mut Script) -> (StatusCode, Value),
) -> Response {
    let mut script = script.lock().unwrap_or_else(|e| e.into_inner());
    script.requests.push((format!("{method} {path}"), body));
    if let Some((status, body)) = script.fixed.get(&path).cloned() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return json_reply(status, body);
    }
    let (status, value) = route(&mut *script);
    json_reply(status, value.to_string())
}

fn not_found() -> (StatusCode, Value) {
    (StatusCode::NOT_FOUND, json!({"detail": "not found"}))
}

async fn health(State(script): State<Shared>) -> Response {
    reply(&script, Method::GET, "/health".into(), String::new(), |_| {
        (StatusCode::OK, json!({"status": "ok"}))
    })
}

async fn readiness(State(script): State<Shared>) -> Response {
    reply(&script, Method::GET, "/health/ready".into(), String::new(), |_| {
        (StatusCode::OK, json!({"status": "ready"}))
    })
}

async fn crawlers(State(script): State<Shared>) -> Response {
    reply(&script, Method::GET, "/crawlers".into(), String::new(), |s| {
        let total = s.crawlers.len();
        (StatusCode::OK, json!({"crawlers": s.crawlers, "total": total}))
    })
}

async fn submit(State(script): State<Shared>, Path(name): Path<String>, body: String) -> Response {
    let path = format!("/tasks/{name}");
    reply(&script, Method::POST, path, body, |s| {
        let Some(kind) = KINDS.into_iter().find(|k| k.name() == name) else {
            return not_found();
        };
        s.next_task += 1;
        let task_id = format!("{}-{}", kind.name(), s.next_task);
        s.tasks.insert(task_id.clone(), kind);
        (StatusCode::OK, json!({"task_id": task_id}))
    })
}

async fn task_status(State(script): State<Shared>, Path(name): Path<String>) -> Response {
    let path = format!("/tasks/{name}");
    reply(&script, Method::GET, path, String::new(), |s| {
        let Some(kind) = s.tasks.get(&name).copied() else {
            return not_found();
        };
        let status = s
            .statuses
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| TaskStatus::new(TaskState::Done));
        (StatusCode::OK, json!(status))
    })
}

async fn quality(State(script): State<Shared>, Path(report): Path<String>) -> Response {
    let path = format!("/data-quality/{report}");
    reply(&script, Method::GET, path, String::new(), |s| {
        match s.quality.get(report.as_str()) {
            Some(value) => (StatusCode::OK, value.clone()),
            None => not_found(),
        }
    })
}
