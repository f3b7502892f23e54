//! The document store.
//!
//! A single SQLite connection wrapped in `Arc<Mutex<_>>` and injected into the
//! Actix application as `web::Data<Database>`. Handlers lock it, run their
//! statements and release it; no statement group is wrapped in a transaction,
//! so every write stands on its own.
//!
//! Timestamps are stored as RFC 3339 text with millisecond precision and a
//! `Z` suffix, which keeps lexicographic order equal to chronological order
//! and lets `substr` cut calendar buckets out of them.

pub mod rows;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tools (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL UNIQUE,
    slug           TEXT NOT NULL UNIQUE,
    category       TEXT NOT NULL,
    tags           TEXT NOT NULL DEFAULT '[]',
    company        TEXT,
    description    TEXT NOT NULL,
    link           TEXT NOT NULL,
    image          TEXT,
    status         TEXT NOT NULL DEFAULT 'Free',
    pricing        TEXT NOT NULL DEFAULT 'Free',
    rating         REAL NOT NULL DEFAULT 0,
    review_count   INTEGER NOT NULL DEFAULT 0,
    view_count     INTEGER NOT NULL DEFAULT 0,
    bookmark_count INTEGER NOT NULL DEFAULT 0,
    featured       INTEGER NOT NULL DEFAULT 0,
    approved       INTEGER NOT NULL DEFAULT 0,
    submitted_by   TEXT,
    approved_by    TEXT,
    approved_at    TEXT,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_tools_category ON tools (category);
CREATE INDEX IF NOT EXISTS idx_tools_approved_created ON tools (approved, created_at);

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    slug        TEXT NOT NULL UNIQUE,
    description TEXT,
    icon        TEXT,
    color       TEXT,
    featured    INTEGER NOT NULL DEFAULT 0,
    sort_order  INTEGER NOT NULL DEFAULT 0,
    parent_id   TEXT,
    tool_count  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories (parent_id);

CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    clerk_id    TEXT UNIQUE,
    email       TEXT NOT NULL UNIQUE,
    username    TEXT NOT NULL,
    first_name  TEXT,
    last_name   TEXT,
    image_url   TEXT,
    role        TEXT NOT NULL DEFAULT 'user',
    is_active   INTEGER NOT NULL DEFAULT 1,
    last_login  TEXT,
    login_count INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_bookmarks (
    user_id    TEXT NOT NULL,
    tool_id    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (user_id, tool_id)
);

CREATE TABLE IF NOT EXISTS user_submitted_tools (
    user_id    TEXT NOT NULL,
    tool_id    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (user_id, tool_id)
);

-- One review per (user, tool) is kept by the review handler, not by a constraint.
CREATE TABLE IF NOT EXISTS user_reviews (
    user_id    TEXT NOT NULL,
    tool_id    TEXT NOT NULL,
    rating     INTEGER NOT NULL,
    comment    TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_user_reviews_pair ON user_reviews (user_id, tool_id);

CREATE TABLE IF NOT EXISTS newsletter_subscribers (
    id                 TEXT PRIMARY KEY,
    email              TEXT NOT NULL UNIQUE,
    interests          TEXT NOT NULL DEFAULT '[]',
    source             TEXT,
    is_active          INTEGER NOT NULL DEFAULT 1,
    subscribed_at      TEXT NOT NULL,
    unsubscribed_at    TEXT,
    unsubscribe_reason TEXT,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);
"#;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the SQLite file at `path` and applies the schema.
    pub fn open(path: &str) -> rusqlite::Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}

/// A new 24-character lowercase hex id.
pub fn new_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

/// True for 24-character hex strings, the only id shape the API hands out.
pub fn is_object_id(value: &str) -> bool {
    value.len() == 24 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Builds a partial `UPDATE ... SET a = ?1, b = ?2 WHERE id = ?n` statement.
#[derive(Default)]
pub struct Assignments {
    columns: Vec<String>,
    args: Vec<Value>,
}

impl Assignments {
    pub fn set(&mut self, column: &str, value: Value) {
        self.args.push(value);
        self.columns.push(format!("{} = ?{}", column, self.args.len()));
    }

    /// `None` writes SQL `NULL`.
    pub fn set_text(&mut self, column: &str, value: Option<&str>) {
        let value = match value {
            Some(text) => Value::Text(text.to_string()),
            None => Value::Null,
        };
        self.set(column, value);
    }

    pub fn into_statement(mut self, table: &str, id: &str) -> (String, Vec<Value>) {
        self.args.push(Value::Text(id.to_string()));
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            self.columns.join(", "),
            self.args.len()
        );
        (sql, self.args)
    }
}
