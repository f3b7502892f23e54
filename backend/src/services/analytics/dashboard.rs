//! # Dashboard Rollup
//!
//! Each section of the dashboard is an independent query. They are issued
//! together with `try_join!`; the first error aborts the rest and the
//! request fails with a 500, so a partial dashboard is never returned.

use crate::auth::AdminUser;
use crate::db::{timestamp, Database};
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use common::model::analytics::{
    CategoryStat, Dashboard, DashboardTotals, MonthlyBucket, MostViewedTool, RecentActivity,
    TopRatedTool,
};
use common::responses::ApiResponse;
use futures_util::try_join;
use rusqlite::params;

const RECENT_DAYS: i64 = 30;
const GROWTH_DAYS: i64 = 360;
const LEADERBOARD_SIZE: i64 = 10;
/// Tools with fewer reviews are left out of the top-rated board.
const MIN_REVIEWS_FOR_TOP_RATED: i64 = 5;

/// Actix web handler for `GET /api/analytics/dashboard` (admin).
///
/// # Returns
/// - `200 OK` with the complete dashboard.
/// - `500 Internal Server Error` when any section fails; no partial dashboard
///   is sent.
pub async fn process(db: web::Data<Database>, _admin: AdminUser) -> ApiResult<HttpResponse> {
    let dashboard = build_dashboard(&db).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(dashboard)))
}

pub async fn build_dashboard(db: &Database) -> ApiResult<Dashboard> {
    let (totals, tools_by_category, top_rated, most_viewed, recent_activity, monthly_growth) = try_join!(
        totals(db),
        tools_by_category(db),
        top_rated(db),
        most_viewed(db),
        recent_activity(db),
        monthly_growth(db),
    )?;

    Ok(Dashboard {
        totals,
        tools_by_category,
        top_rated,
        most_viewed,
        recent_activity,
        monthly_growth,
    })
}

async fn count(db: &Database, sql: &str, since: Option<&str>) -> ApiResult<i64> {
    let conn = db.lock().await;
    let count = match since {
        Some(since) => conn.query_row(sql, params![since], |row| row.get(0))?,
        None => conn.query_row(sql, [], |row| row.get(0))?,
    };
    Ok(count)
}

async fn totals(db: &Database) -> ApiResult<DashboardTotals> {
    let (tools, users, subscribers) = try_join!(
        count(db, "SELECT COUNT(*) FROM tools WHERE approved = 1", None),
        count(db, "SELECT COUNT(*) FROM users WHERE is_active = 1", None),
        count(
            db,
            "SELECT COUNT(*) FROM newsletter_subscribers WHERE is_active = 1",
            None
        ),
    )?;
    Ok(DashboardTotals {
        tools,
        users,
        subscribers,
    })
}

async fn tools_by_category(db: &Database) -> ApiResult<Vec<CategoryStat>> {
    let conn = db.lock().await;
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*), AVG(rating) FROM tools
         WHERE approved = 1
         GROUP BY category
         ORDER BY COUNT(*) DESC, category ASC
         LIMIT ?1",
    )?;
    let stats = stmt
        .query_map(params![LEADERBOARD_SIZE], |row| {
            Ok(CategoryStat {
                category: row.get(0)?,
                count: row.get(1)?,
                average_rating: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stats)
}

async fn top_rated(db: &Database) -> ApiResult<Vec<TopRatedTool>> {
    let conn = db.lock().await;
    let mut stmt = conn.prepare(
        "SELECT id, name, category, rating, review_count, image FROM tools
         WHERE approved = 1 AND review_count >= ?1
         ORDER BY rating DESC, review_count DESC
         LIMIT ?2",
    )?;
    let tools = stmt
        .query_map(params![MIN_REVIEWS_FOR_TOP_RATED, LEADERBOARD_SIZE], |row| {
            Ok(TopRatedTool {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                rating: row.get(3)?,
                review_count: row.get(4)?,
                image: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tools)
}

async fn most_viewed(db: &Database) -> ApiResult<Vec<MostViewedTool>> {
    let conn = db.lock().await;
    let mut stmt = conn.prepare(
        "SELECT id, name, category, view_count, image FROM tools
         WHERE approved = 1
         ORDER BY view_count DESC
         LIMIT ?1",
    )?;
    let tools = stmt
        .query_map(params![LEADERBOARD_SIZE], |row| {
            Ok(MostViewedTool {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                view_count: row.get(3)?,
                image: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tools)
}

async fn recent_activity(db: &Database) -> ApiResult<RecentActivity> {
    let since = timestamp(Utc::now() - Duration::days(RECENT_DAYS));
    let since = Some(since.as_str());
    let (new_tools, new_users, new_subscribers) = try_join!(
        count(db, "SELECT COUNT(*) FROM tools WHERE created_at >= ?1", since),
        count(db, "SELECT COUNT(*) FROM users WHERE created_at >= ?1", since),
        count(
            db,
            "SELECT COUNT(*) FROM newsletter_subscribers WHERE created_at >= ?1",
            since
        ),
    )?;
    Ok(RecentActivity {
        new_tools,
        new_users,
        new_subscribers,
    })
}

async fn monthly_growth(db: &Database) -> ApiResult<Vec<MonthlyBucket>> {
    let since = timestamp(Utc::now() - Duration::days(GROWTH_DAYS));
    let conn = db.lock().await;
    let mut stmt = conn.prepare(
        "SELECT CAST(substr(created_at, 1, 4) AS INTEGER) AS year,
                CAST(substr(created_at, 6, 2) AS INTEGER) AS month,
                COUNT(*)
         FROM tools
         WHERE approved = 1 AND created_at >= ?1
         GROUP BY year, month
         ORDER BY year ASC, month ASC",
    )?;
    let buckets = stmt
        .query_map(params![since], |row| {
            Ok(MonthlyBucket {
                year: row.get(0)?,
                month: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(buckets)
}
