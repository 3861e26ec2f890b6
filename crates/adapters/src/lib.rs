// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the remote crawling and data-quality services

mod error;
mod http;

pub mod gateway;
pub mod quality;
pub mod traced;

#[cfg(any(test, feature = "test-support"))]
mod service;

pub use error::GatewayError;
pub use gateway::{
    CrawlerGateway, CrawlerList, HttpGateway, ServiceStatus, TaskHandle, TaskKind, TaskRequest,
    TaskState, TaskStatus,
};
pub use quality::{
    CoverageReport, FreshnessReport, HttpQualityAdapter, IngestionSummary, QualityAdapter,
};
pub use traced::{TracedGateway, TracedQualityAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use gateway::{FakeGateway, GatewayCall};
#[cfg(any(test, feature = "test-support"))]
pub use quality::{FakeQualityAdapter, QualityCall};
#[cfg(any(test, feature = "test-support"))]
pub use service::FakeService;
