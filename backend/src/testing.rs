//! Test fixtures: an in-memory app and seed helpers that write rows directly.

use crate::db::rows::{find_user_by_subject, tags_json};
use crate::db::{new_id, timestamp, Database};
use chrono::{DateTime, Utc};
use common::model::user::User;
use rusqlite::params;

/// Builds the full service over `$db` with default configuration.
macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(actix_web::App::new().configure(|cfg| {
            crate::services::configure(cfg, $db.clone(), crate::config::Config::default())
        }))
        .await
    };
}

pub fn database() -> Database {
    Database::open_in_memory().expect("in-memory database")
}

pub struct ToolSeed {
    pub name: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    pub company: Option<String>,
    pub status: &'static str,
    pub approved: bool,
    pub featured: bool,
    pub rating: f64,
    pub review_count: i64,
    pub view_count: i64,
    pub bookmark_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ToolSeed {
    /// An approved tool with zeroed counters, created now.
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{} does useful things with AI", name),
            tags: Vec::new(),
            company: None,
            status: "Free",
            approved: true,
            featured: false,
            rating: 0.0,
            review_count: 0,
            view_count: 0,
            bookmark_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn status(mut self, status: &'static str) -> Self {
        self.status = status;
        self
    }

    pub fn unapproved(mut self) -> Self {
        self.approved = false;
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn rating(mut self, rating: f64, review_count: i64) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    pub fn views(mut self, view_count: i64) -> Self {
        self.view_count = view_count;
        self
    }

    pub fn bookmarks(mut self, bookmark_count: i64) -> Self {
        self.bookmark_count = bookmark_count;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn insert(self, db: &Database) -> String {
        let id = new_id();
        let created = timestamp(self.created_at);
        let conn = db.lock().await;
        conn.execute(
            "INSERT INTO tools (id, name, slug, category, tags, company, description, link, status,
                pricing, rating, review_count, view_count, bookmark_count, featured, approved,
                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'https://example.com', ?8, 'Free', ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?15)",
            params![
                id,
                self.name,
                common::model::slugify(&self.name),
                self.category,
                tags_json(&self.tags),
                self.company,
                self.description,
                self.status,
                self.rating,
                self.review_count,
                self.view_count,
                self.bookmark_count,
                self.featured,
                self.approved,
                created,
            ],
        )
        .expect("seed tool");
        id
    }
}

pub async fn seed_user(db: &Database, username: &str, role: &str) -> User {
    seed_user_at(db, username, role, Utc::now()).await
}

pub async fn seed_user_at(db: &Database, username: &str, role: &str, at: DateTime<Utc>) -> User {
    let id = new_id();
    let conn = db.lock().await;
    conn.execute(
        "INSERT INTO users (id, clerk_id, email, username, role, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            id,
            format!("user_{}", username),
            format!("{}@example.com", username),
            username,
            role,
            timestamp(at),
        ],
    )
    .expect("seed user");
    find_user_by_subject(&conn, &id)
        .expect("load user")
        .expect("user exists")
}

pub async fn seed_category(db: &Database, name: &str, order: i64, featured: bool) -> String {
    let id = new_id();
    let now = timestamp(Utc::now());
    let conn = db.lock().await;
    conn.execute(
        "INSERT INTO categories (id, name, slug, featured, sort_order, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![id, name, common::model::slugify(name), featured, order, now],
    )
    .expect("seed category");
    id
}

pub async fn seed_subscriber_at(db: &Database, email: &str, active: bool, at: DateTime<Utc>) {
    let created = timestamp(at);
    let conn = db.lock().await;
    conn.execute(
        "INSERT INTO newsletter_subscribers (id, email, interests, is_active, subscribed_at,
            created_at, updated_at)
         VALUES (?1, ?2, '[\"new-tools\"]', ?3, ?4, ?4, ?4)",
        params![new_id(), email, active, created],
    )
    .expect("seed subscriber");
}

/// Reads a single integer column of one tool.
pub async fn tool_counter(db: &Database, id: &str, column: &str) -> i64 {
    let conn = db.lock().await;
    conn.query_row(
        &format!("SELECT {} FROM tools WHERE id = ?1", column),
        params![id],
        |row| row.get(0),
    )
    .expect("tool counter")
}
