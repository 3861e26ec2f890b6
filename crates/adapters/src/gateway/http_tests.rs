// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::gateway::TaskState;
use crate::FakeService;

fn gateway(base: &str) -> HttpGateway {
    HttpGateway::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn health_and_readiness_decode_status() {
    let service = FakeService::start().await.unwrap();
    let gateway = gateway(service.url());

    assert_eq!(gateway.health().await.unwrap().status, "ok");
    assert_eq!(gateway.readiness().await.unwrap().status, "ready");
    assert_eq!(service.targets(), ["GET /health", "GET /health/ready"]);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let service = FakeService::start().await.unwrap();
    service.respond("/health/ready", 503, r#"{"status":"starting"}"#);

    let err = gateway(service.url()).readiness().await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Status {
            endpoint: "/health/ready".to_string(),
            status: 503
        }
    );
}

#[tokio::test]
async fn list_crawlers_ignores_extra_fields() {
    let service = FakeService::start().await.unwrap();
    service.respond(
        "/crawlers",
        200,
        r#"{"crawlers":["pchome","momo"],"total":2,"version":"1.4"}"#,
    );

    let list = gateway(service.url()).list_crawlers().await.unwrap();
    assert_eq!(list.total, 2);
    assert_eq!(list.crawlers, ["pchome", "momo"]);
}

#[tokio::test]
async fn submit_posts_request_body_to_kind_endpoint() {
    let service = FakeService::start().await.unwrap();
    let handle = gateway(service.url())
        .submit(&TaskRequest::Search {
            site: "pchome".to_string(),
            keyword: "豆腐".to_string(),
            limit: 3,
        })
        .await
        .unwrap();

    assert_eq!(handle.task_id, "search-1");
    let (target, body) = service.requests().remove(0);
    assert_eq!(target, "POST /tasks/search");
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"site": "pchome", "keyword": "豆腐", "limit": 3})
    );
}

#[tokio::test]
async fn task_status_follows_submitted_task() {
    let service = FakeService::start().await.unwrap();
    service.set_task_status(TaskKind::Batch, TaskStatus::new(TaskState::Running));
    let gateway = gateway(service.url());

    let handle = gateway
        .submit(&TaskRequest::Batch {
            keywords: vec!["豆腐".to_string()],
            sites: vec![],
            limit_per_keyword: 10,
        })
        .await
        .unwrap();
    let status = gateway.task_status(&handle.task_id).await.unwrap();

    assert_eq!(status.status, TaskState::Running);
    assert_eq!(service.targets()[1], format!("GET /tasks/{}", handle.task_id));
}

#[tokio::test]
async fn task_status_reads_error_detail() {
    let service = FakeService::start().await.unwrap();
    service.respond(
        "/tasks/t-7",
        200,
        r#"{"status":"failed","error":"blocked by captcha"}"#,
    );

    let status = gateway(service.url()).task_status("t-7").await.unwrap();
    assert_eq!(status.status, TaskState::Failed);
    assert_eq!(status.error.as_deref(), Some("blocked by captcha"));
    assert_eq!(service.targets(), ["GET /tasks/t-7"]);
}

#[tokio::test]
async fn unknown_task_is_a_status_error() {
    let service = FakeService::start().await.unwrap();
    let err = gateway(service.url()).task_status("t-9").await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 404, .. }));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let service = FakeService::start().await.unwrap();
    service.respond("/tasks/t-1", 200, r#"{"status":"sideways"}"#);

    let err = gateway(service.url()).task_status("t-1").await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode { .. }));
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(&format!("http://{}/", addr)).health().await.unwrap_err();
    assert!(matches!(err, GatewayError::Unreachable { .. }));
}
