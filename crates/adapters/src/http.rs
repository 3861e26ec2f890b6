// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON over HTTP plumbing shared by the service adapters

use crate::GatewayError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Thin reqwest wrapper bound to one service base URL
#[derive(Clone, Debug)]
pub(crate) struct JsonClient {
    client: reqwest::Client,
    base_url: String,
}

impl JsonClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let request = self.client.get(self.url(path));
        Self::send(path, request).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        Self::send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::unreachable(path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::unreachable(path, e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}
