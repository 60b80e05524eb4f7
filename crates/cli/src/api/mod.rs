// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote API client abstraction.
//!
//! The reconciler and the directory talk to the restaurant service through
//! the [`RemoteApi`] trait. [`HttpApi`] is the reqwest-backed implementation;
//! tests substitute a scripted mock.

mod http;

pub use http::HttpApi;

use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use bistro_core::Method;

/// Error type for remote API calls that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (refused, timed out, DNS, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The base URL or request path could not be turned into a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Result type for remote API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// A completed HTTP exchange: the status and the parsed JSON body, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        ApiResponse { status, body }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Statuses worth replaying later: timeouts, throttling, server errors.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status, 408 | 425 | 429 | 500..=599)
    }

    /// The target no longer exists remotely.
    pub fn is_gone(&self) -> bool {
        matches!(self.status, 404 | 410)
    }

    /// Decodes the body, `None` when the response had no body.
    pub fn decode<T: DeserializeOwned>(&self) -> ApiResult<Option<T>> {
        self.body
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Remote API trait for the restaurant/review service.
///
/// Paths are relative to the configured base URL (`/reviews`,
/// `/restaurants/3/?is_favorite=true`). Any HTTP status is a successful
/// exchange; only transport failures are errors.
pub trait RemoteApi: Send + Sync {
    /// Issue a request and wait for the response.
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> BoxFuture<'a, ApiResult<ApiResponse>>;

    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, ApiResult<ApiResponse>> {
        self.request(Method::Get, path, None)
    }

    fn post<'a>(&'a self, path: &'a str, body: &'a Value) -> BoxFuture<'a, ApiResult<ApiResponse>> {
        self.request(Method::Post, path, Some(body))
    }

    fn put<'a>(
        &'a self,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> BoxFuture<'a, ApiResult<ApiResponse>> {
        self.request(Method::Put, path, body)
    }

    fn delete<'a>(&'a self, path: &'a str) -> BoxFuture<'a, ApiResult<ApiResponse>> {
        self.request(Method::Delete, path, None)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
