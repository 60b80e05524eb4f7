// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending operations: writes the remote service has not confirmed yet.
//!
//! A pending operation records everything needed to replay a write later:
//! the HTTP method, the target path, the body, and the local record it
//! belongs to (`foreignStore` + `foreignKey`). Operations sharing a foreign
//! key must replay in the order they were enqueued.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::EntityKind;

/// HTTP method of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

/// A write to be queued, before the store has assigned it a sequence id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPendingOperation {
    pub foreign_key: i64,
    pub foreign_store: EntityKind,
    pub method: Method,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl NewPendingOperation {
    pub fn new(
        foreign_store: EntityKind,
        foreign_key: i64,
        method: Method,
        url: impl Into<String>,
        body: Option<serde_json::Value>,
    ) -> Self {
        NewPendingOperation {
            foreign_key,
            foreign_store,
            method,
            url: url.into(),
            body,
        }
    }
}

/// A queued write, as stored in the local pending queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOperation {
    /// Auto-assigned, strictly increasing sequence id.
    pub seq: i64,
    pub foreign_key: i64,
    pub foreign_store: EntityKind,
    pub method: Method,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl PendingOperation {
    /// The `(store, key)` pair that orders this operation against others.
    pub fn key(&self) -> (EntityKind, i64) {
        (self.foreign_store, self.foreign_key)
    }

    /// Points this operation at a new id for the same record.
    ///
    /// Used when a provisional id is replaced by the one the remote service
    /// assigned: the foreign key, the item path, and any `id` in the body
    /// all move to `new_id`.
    pub fn rebind(&mut self, new_id: i64) {
        let old_path = self.foreign_store.item_path(self.foreign_key);
        let new_path = self.foreign_store.item_path(new_id);
        if self.url == old_path {
            self.url = new_path;
        } else if let Some(rest) = self.url.strip_prefix(&old_path) {
            if rest.starts_with('/') || rest.starts_with('?') {
                self.url = format!("{new_path}{rest}");
            }
        }
        if let Some(serde_json::Value::Object(map)) = self.body.as_mut() {
            if map.contains_key("id") {
                map.insert("id".to_string(), serde_json::Value::from(new_id));
            }
        }
        self.foreign_key = new_id;
    }
}

impl fmt::Display for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} ({} {})",
            self.seq, self.method, self.url, self.foreign_store, self.foreign_key
        )
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
