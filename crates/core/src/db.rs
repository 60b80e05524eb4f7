// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed local store.
//!
//! The [`Database`] struct holds the mirrored restaurants and reviews plus the
//! queue of pending operations waiting to be replayed against the remote
//! service.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pending::{NewPendingOperation, PendingOperation};
use crate::record::{EntityKind, Record};
use crate::restaurant::{LatLng, Restaurant};
use crate::review::Review;

/// SQL schema for the local store.
pub const SCHEMA: &str = r#"
-- Restaurants mirrored from the remote directory
CREATE TABLE IF NOT EXISTS restaurants (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    neighborhood TEXT NOT NULL DEFAULT '',
    cuisine_type TEXT NOT NULL DEFAULT '',
    lat REAL NOT NULL DEFAULT 0,
    lng REAL NOT NULL DEFAULT 0,
    photograph TEXT,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    operating_hours TEXT NOT NULL DEFAULT '{}',
    created_at TEXT,
    updated_at TEXT,
    pending INTEGER NOT NULL DEFAULT 0
);

-- Reviews; negative ids are provisional (not yet confirmed remotely)
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    restaurant_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    rating INTEGER NOT NULL,
    comments TEXT NOT NULL,
    created_at TEXT,
    updated_at TEXT,
    pending INTEGER NOT NULL DEFAULT 0
);

-- Writes waiting to be replayed, in enqueue order
CREATE TABLE IF NOT EXISTS pending_ops (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    foreign_key INTEGER NOT NULL,
    foreign_store TEXT NOT NULL,
    method TEXT NOT NULL,
    url TEXT NOT NULL,
    body TEXT,
    created_at TEXT NOT NULL
);

-- Last provisional id handed out per table; never handed out again
CREATE TABLE IF NOT EXISTS provisional_ids (
    kind TEXT PRIMARY KEY,
    last_id INTEGER NOT NULL
);

-- Provisional ids the remote service has since confirmed
CREATE TABLE IF NOT EXISTS rebound_ids (
    kind TEXT NOT NULL,
    provisional_id INTEGER NOT NULL,
    confirmed_id INTEGER NOT NULL,
    PRIMARY KEY (kind, provisional_id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_restaurants_neighborhood ON restaurants(neighborhood);
CREATE INDEX IF NOT EXISTS idx_restaurants_cuisine ON restaurants(cuisine_type);
CREATE INDEX IF NOT EXISTS idx_reviews_restaurant ON reviews(restaurant_id);
CREATE INDEX IF NOT EXISTS idx_pending_key ON pending_ops(foreign_store, foreign_key);
"#;

const RESTAURANT_COLUMNS: &str = "id, name, address, neighborhood, cuisine_type, lat, lng, \
     photograph, is_favorite, operating_hours, created_at, updated_at, pending";

const REVIEW_COLUMNS: &str =
    "id, restaurant_id, name, rating, comments, created_at, updated_at, pending";

const PENDING_COLUMNS: &str = "seq, foreign_key, foreign_store, method, url, body, created_at";

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| conversion_error(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse a JSON column from the database.
fn parse_json<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|e| conversion_error(format!("invalid JSON in column '{column}': {e}")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

fn restaurant_from_row(row: &Row<'_>) -> std::result::Result<Restaurant, rusqlite::Error> {
    let hours: String = row.get(9)?;
    Ok(Restaurant {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        neighborhood: row.get(3)?,
        cuisine_type: row.get(4)?,
        latlng: LatLng {
            lat: row.get(5)?,
            lng: row.get(6)?,
        },
        photograph: row.get(7)?,
        is_favorite: row.get(8)?,
        operating_hours: parse_json(&hours, "operating_hours")?,
        created_at: parse_timestamp_opt(row.get(10)?, "created_at")?,
        updated_at: parse_timestamp_opt(row.get(11)?, "updated_at")?,
        pending: row.get(12)?,
    })
}

fn review_from_row(row: &Row<'_>) -> std::result::Result<Review, rusqlite::Error> {
    Ok(Review {
        id: row.get(0)?,
        restaurant_id: row.get(1)?,
        name: row.get(2)?,
        rating: row.get(3)?,
        comments: row.get(4)?,
        created_at: parse_timestamp_opt(row.get(5)?, "created_at")?,
        updated_at: parse_timestamp_opt(row.get(6)?, "updated_at")?,
        pending: row.get(7)?,
    })
}

fn pending_from_row(row: &Row<'_>) -> std::result::Result<PendingOperation, rusqlite::Error> {
    let store: String = row.get(2)?;
    let method: String = row.get(3)?;
    let body: Option<String> = row.get(5)?;
    let created: String = row.get(6)?;
    Ok(PendingOperation {
        seq: row.get(0)?,
        foreign_key: row.get(1)?,
        foreign_store: parse_db(&store, "foreign_store")?,
        method: parse_db(&method, "method")?,
        url: row.get(4)?,
        body: body.map(|b| parse_json(&b, "body")).transpose()?,
        created_at: parse_timestamp(&created, "created_at")?,
    })
}

fn write_restaurant(conn: &Connection, restaurant: &Restaurant) -> Result<()> {
    let hours = serde_json::to_string(&restaurant.operating_hours)?;
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO restaurants ({RESTAURANT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ),
        params![
            restaurant.id,
            restaurant.name,
            restaurant.address,
            restaurant.neighborhood,
            restaurant.cuisine_type,
            restaurant.latlng.lat,
            restaurant.latlng.lng,
            restaurant.photograph,
            restaurant.is_favorite,
            hours,
            restaurant.created_at.map(|t| t.to_rfc3339()),
            restaurant.updated_at.map(|t| t.to_rfc3339()),
            restaurant.pending,
        ],
    )?;
    Ok(())
}

fn write_review(conn: &Connection, review: &Review) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO reviews ({REVIEW_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ),
        params![
            review.id,
            review.restaurant_id,
            review.name,
            review.rating,
            review.comments,
            review.created_at.map(|t| t.to_rfc3339()),
            review.updated_at.map(|t| t.to_rfc3339()),
            review.pending,
        ],
    )?;
    Ok(())
}

fn write_record(conn: &Connection, record: &Record) -> Result<()> {
    match record {
        Record::Restaurant(r) => write_restaurant(conn, r),
        Record::Review(r) => write_review(conn, r),
    }
}

/// Run schema creation and all migrations on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_pending_marker(conn)?;
    Ok(())
}

/// Migration: Add the `pending` marker column to record tables.
///
/// Stores created before offline writes were queued lack the column.
fn migrate_add_pending_marker(conn: &Connection) -> Result<()> {
    for table in [EntityKind::Restaurants.as_str(), EntityKind::Reviews.as_str()] {
        let has_column: bool = conn
            .query_row(
                &format!(
                    "SELECT COUNT(*) > 0 FROM pragma_table_info('{table}') WHERE name = 'pending'"
                ),
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !has_column {
            let sql = format!("ALTER TABLE {table} ADD COLUMN pending INTEGER NOT NULL DEFAULT 0");
            conn.execute(&sql, [])?;
        }
    }
    Ok(())
}

/// SQLite database connection with local store operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Restaurants
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or replace a restaurant.
    pub fn put_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        write_restaurant(&self.conn, restaurant)
    }

    /// Get a restaurant by ID.
    pub fn get_restaurant(&self, id: i64) -> Result<Restaurant> {
        self.conn
            .query_row(
                &format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?1"),
                params![id],
                restaurant_from_row,
            )
            .optional()?
            .ok_or(Error::RestaurantNotFound(id))
    }

    /// List all restaurants ordered by id.
    pub fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY id"
        ))?;
        let restaurants = stmt
            .query_map([], restaurant_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(restaurants)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reviews
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or replace a review.
    pub fn put_review(&self, review: &Review) -> Result<()> {
        write_review(&self.conn, review)
    }

    /// Get a review by ID.
    pub fn get_review(&self, id: i64) -> Result<Review> {
        self.conn
            .query_row(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
                params![id],
                review_from_row,
            )
            .optional()?
            .ok_or(Error::ReviewNotFound(id))
    }

    /// List all reviews ordered by id.
    pub fn list_reviews(&self) -> Result<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY id"))?;
        let reviews = stmt
            .query_map([], review_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reviews)
    }

    /// List the reviews of one restaurant, oldest first.
    pub fn list_reviews_for(&self, restaurant_id: i64) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE restaurant_id = ?1
             ORDER BY created_at, id"
        ))?;
        let reviews = stmt
            .query_map(params![restaurant_id], review_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reviews)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Records of any kind
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or replace a record in its collection.
    pub fn put_record(&self, record: &Record) -> Result<()> {
        write_record(&self.conn, record)
    }

    /// Get a record by kind and id, `None` if absent.
    pub fn get_record(&self, kind: EntityKind, id: i64) -> Result<Option<Record>> {
        let found = match kind {
            EntityKind::Restaurants => self.get_restaurant(id).map(Record::Restaurant),
            EntityKind::Reviews => self.get_review(id).map(Record::Review),
        };
        match found {
            Ok(record) => Ok(Some(record)),
            Err(Error::RestaurantNotFound(_)) | Err(Error::ReviewNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List every record of a kind.
    pub fn list_records(&self, kind: EntityKind) -> Result<Vec<Record>> {
        Ok(match kind {
            EntityKind::Restaurants => self
                .list_restaurants()?
                .into_iter()
                .map(Record::Restaurant)
                .collect(),
            EntityKind::Reviews => self.list_reviews()?.into_iter().map(Record::Review).collect(),
        })
    }

    /// Delete a record. Returns whether a row was removed.
    pub fn delete_record(&self, kind: EntityKind, id: i64) -> Result<bool> {
        let affected = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", kind.as_str()),
            params![id],
        )?;
        Ok(affected > 0)
    }

    /// Set or clear the pending marker of a record. Returns whether it exists.
    pub fn set_pending_marker(&self, kind: EntityKind, id: i64, pending: bool) -> Result<bool> {
        let affected = self.conn.execute(
            &format!("UPDATE {} SET pending = ?1 WHERE id = ?2", kind.as_str()),
            params![pending, id],
        )?;
        Ok(affected > 0)
    }

    /// Allocate a provisional id.
    ///
    /// Ids count down from -1 and are never reused, even after the records
    /// that carried them were confirmed or deleted.
    pub fn next_provisional_id(&mut self, kind: EntityKind) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let last: Option<i64> = tx
            .query_row(
                "SELECT last_id FROM provisional_ids WHERE kind = ?1",
                params![kind.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        // Stores written before the counter existed only have their rows.
        let min: Option<i64> = tx.query_row(
            &format!("SELECT MIN(id) FROM {}", kind.as_str()),
            [],
            |row| row.get(0),
        )?;
        let next = last.unwrap_or(0).min(min.unwrap_or(0)).min(0) - 1;
        tx.execute(
            "INSERT OR REPLACE INTO provisional_ids (kind, last_id) VALUES (?1, ?2)",
            params![kind.as_str(), next],
        )?;
        tx.commit()?;
        Ok(next)
    }

    /// Remember that a provisional id was confirmed as `confirmed_id`.
    pub fn record_rebound(
        &self,
        kind: EntityKind,
        provisional_id: i64,
        confirmed_id: i64,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO rebound_ids (kind, provisional_id, confirmed_id)
             VALUES (?1, ?2, ?3)",
            params![kind.as_str(), provisional_id, confirmed_id],
        )?;
        Ok(())
    }

    /// The current id of a record: the confirmed id if `id` was a rebound
    /// provisional id, otherwise `id` itself.
    pub fn resolve_id(&self, kind: EntityKind, id: i64) -> Result<i64> {
        if id >= 0 {
            return Ok(id);
        }
        let confirmed: Option<i64> = self
            .conn
            .query_row(
                "SELECT confirmed_id FROM rebound_ids WHERE kind = ?1 AND provisional_id = ?2",
                params![kind.as_str(), id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(confirmed.unwrap_or(id))
    }

    /// Upsert records fetched from the remote service.
    ///
    /// Records with a pending marker keep their local (optimistic) state.
    /// Returns the number of records written.
    pub fn mirror_records(&mut self, records: &[Record]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut written = 0;
        for record in records {
            let pending: Option<bool> = tx
                .query_row(
                    &format!("SELECT pending FROM {} WHERE id = ?1", record.kind().as_str()),
                    params![record.id()],
                    |row| row.get(0),
                )
                .optional()?;
            if pending == Some(true) {
                continue;
            }
            write_record(&tx, record)?;
            written += 1;
        }
        tx.commit()?;
        Ok(written)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pending operations
    // ─────────────────────────────────────────────────────────────────────

    /// Append an operation to the pending queue, assigning its sequence id.
    pub fn add_pending(&self, op: &NewPendingOperation) -> Result<PendingOperation> {
        let created_at = Utc::now();
        let body = op.body.as_ref().map(serde_json::to_string).transpose()?;
        self.conn.execute(
            "INSERT INTO pending_ops (foreign_key, foreign_store, method, url, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                op.foreign_key,
                op.foreign_store.as_str(),
                op.method.as_str(),
                op.url,
                body,
                created_at.to_rfc3339(),
            ],
        )?;
        Ok(PendingOperation {
            seq: self.conn.last_insert_rowid(),
            foreign_key: op.foreign_key,
            foreign_store: op.foreign_store,
            method: op.method,
            url: op.url.clone(),
            body: op.body.clone(),
            created_at,
        })
    }

    /// All pending operations in enqueue order.
    pub fn list_pending(&self) -> Result<Vec<PendingOperation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PENDING_COLUMNS} FROM pending_ops ORDER BY seq"
        ))?;
        let ops = stmt
            .query_map([], pending_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ops)
    }

    /// Pending operations for one record, in enqueue order.
    pub fn list_pending_for(&self, kind: EntityKind, key: i64) -> Result<Vec<PendingOperation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PENDING_COLUMNS} FROM pending_ops
             WHERE foreign_store = ?1 AND foreign_key = ?2 ORDER BY seq"
        ))?;
        let ops = stmt
            .query_map(params![kind.as_str(), key], pending_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ops)
    }

    /// Get a pending operation by sequence id.
    pub fn get_pending(&self, seq: i64) -> Result<PendingOperation> {
        self.conn
            .query_row(
                &format!("SELECT {PENDING_COLUMNS} FROM pending_ops WHERE seq = ?1"),
                params![seq],
                pending_from_row,
            )
            .optional()?
            .ok_or(Error::PendingNotFound(seq))
    }

    /// Rewrite a queued operation in place, keeping its position.
    pub fn update_pending(&self, op: &PendingOperation) -> Result<()> {
        let body = op.body.as_ref().map(serde_json::to_string).transpose()?;
        let affected = self.conn.execute(
            "UPDATE pending_ops
             SET foreign_key = ?1, foreign_store = ?2, method = ?3, url = ?4, body = ?5
             WHERE seq = ?6",
            params![
                op.foreign_key,
                op.foreign_store.as_str(),
                op.method.as_str(),
                op.url,
                body,
                op.seq,
            ],
        )?;
        if affected == 0 {
            return Err(Error::PendingNotFound(op.seq));
        }
        Ok(())
    }

    /// Remove a pending operation. Returns whether it was still queued.
    pub fn remove_pending(&self, seq: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM pending_ops WHERE seq = ?1", params![seq])?;
        Ok(affected > 0)
    }

    /// Number of queued operations.
    pub fn count_pending(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pending_ops", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
