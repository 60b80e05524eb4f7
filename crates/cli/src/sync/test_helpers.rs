// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a scripted remote API and fixtures.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::Value;

use bistro_core::{Method, Record, Restaurant, ReviewPayload};

use crate::api::{ApiError, ApiResponse, ApiResult, RemoteApi};
use crate::store::{LocalStore, SqliteStore};

use super::Reconciler;

/// What the mock answers to one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A fixed status and body.
    Status(u16, Option<Value>),
    /// The request body echoed back, with `id` set when given.
    Echo { status: u16, id: Option<i64> },
    /// No response at all.
    Offline,
}

impl Reply {
    pub fn ok() -> Self {
        Reply::Status(200, None)
    }

    pub fn status(status: u16) -> Self {
        Reply::Status(status, None)
    }

    pub fn json(value: Value) -> Self {
        Reply::Status(200, Some(value))
    }

    pub fn created(id: i64) -> Self {
        Reply::Echo {
            status: 201,
            id: Some(id),
        }
    }

    pub fn echo() -> Self {
        Reply::Echo {
            status: 200,
            id: None,
        }
    }
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Mock remote API answering from a script, then from a fallback reply.
pub struct MockApi {
    script: Mutex<VecDeque<Reply>>,
    fallback: Mutex<Reply>,
    calls: Mutex<Vec<Call>>,
    delay: Mutex<Option<Duration>>,
}

impl MockApi {
    /// A mock that answers every request with `reply`.
    pub fn always(reply: Reply) -> Self {
        MockApi {
            script: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    pub fn offline() -> Self {
        Self::always(Reply::Offline)
    }

    /// Answer the next unscripted request with `reply`.
    pub fn push(&self, reply: Reply) {
        self.script.lock().unwrap().push_back(reply);
    }

    /// Change the answer given once the script runs out.
    pub fn set_fallback(&self, reply: Reply) {
        *self.fallback.lock().unwrap() = reply;
    }

    /// Take `delay` to answer each request from now on.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// `METHOD path` of every request so far.
    pub fn requests(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn answer(&self, body: Option<&Value>) -> ApiResult<ApiResponse> {
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.lock().unwrap().clone());
        match reply {
            Reply::Offline => Err(ApiError::Network("connection refused".into())),
            Reply::Status(status, body) => Ok(ApiResponse::new(status, body)),
            Reply::Echo { status, id } => {
                let mut echoed = body.cloned();
                if let (Some(Value::Object(map)), Some(id)) = (echoed.as_mut(), id) {
                    map.insert("id".into(), Value::from(id));
                }
                Ok(ApiResponse::new(status, echoed))
            }
        }
    }
}

impl RemoteApi for MockApi {
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> BoxFuture<'a, ApiResult<ApiResponse>> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        let answer = self.answer(body);
        let delay = *self.delay.lock().unwrap();
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            answer
        })
    }
}

pub type TestReconciler = Reconciler<MockApi, SqliteStore>;

/// A reconciler over an in-memory store and the given mock.
pub fn reconciler(api: MockApi) -> TestReconciler {
    Reconciler::new(api, SqliteStore::open_in_memory().unwrap())
}

/// The review from the offline scenario.
pub fn al_review() -> ReviewPayload {
    ReviewPayload::new(3, "Al", 5, "Great food, would return")
}

pub fn restaurant(id: i64, name: &str, neighborhood: &str, cuisine: &str) -> Restaurant {
    let mut r = Restaurant::new(id, name);
    r.neighborhood = neighborhood.to_string();
    r.cuisine_type = cuisine.to_string();
    r.photograph = Some(id.to_string());
    r
}

/// Put a restaurant straight into the store.
pub async fn seed_restaurant<S: LocalStore>(store: &S, restaurant: Restaurant) {
    store.put(&Record::Restaurant(restaurant)).await.unwrap();
}
