// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors shared by the remote service adapters

use thiserror::Error;

/// Errors from calling a remote service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{endpoint} unreachable: {message}")]
    Unreachable { endpoint: String, message: String },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("{endpoint} returned an unexpected body: {message}")]
    Decode { endpoint: String, message: String },
    #[error("http client setup failed: {0}")]
    Client(String),
}

impl GatewayError {
    pub fn unreachable(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        GatewayError::Unreachable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}
