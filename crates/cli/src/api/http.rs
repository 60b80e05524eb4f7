// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of [`RemoteApi`] using reqwest.

use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

use bistro_core::Method;

use super::{ApiError, ApiResponse, ApiResult, RemoteApi};

/// Remote API client speaking JSON over HTTP.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the service at `base_url`.
    ///
    /// `base_url` must be an absolute `http://` or `https://` URL; a trailing
    /// slash is ignored.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let parsed =
            reqwest::Url::parse(base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{base}: scheme must be http or https"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpApi {
            client,
            base_url: base.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a service path against the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl RemoteApi for HttpApi {
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> BoxFuture<'a, ApiResult<ApiResponse>> {
        Box::pin(async move {
            let url = self.url_for(path);
            let mut request = self.client.request(to_reqwest(method), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            let body = if bytes.is_empty() {
                None
            } else {
                match serde_json::from_slice::<Value>(&bytes) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        debug!("{} {} returned a non-JSON body: {}", method, url, e);
                        None
                    }
                }
            };

            debug!("{} {} -> {}", method, url, status);
            Ok(ApiResponse::new(status, body))
        })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
