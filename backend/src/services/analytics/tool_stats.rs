use crate::auth::AdminUser;
use crate::db::{timestamp, Database};
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use common::model::analytics::{
    AnalyticsPeriod, CategoryDistribution, DailyBucket, StatusCount, ToolAnalytics,
};
use common::model::tool::ToolStatus;
use common::requests::AnalyticsQuery;
use common::responses::ApiResponse;
use log::warn;
use rusqlite::{params, Connection};

/// Actix web handler for `GET /api/analytics/tools?period=` (admin).
///
/// # Arguments
/// * `query` - The window: `7d`, `30d`, `90d` or `1y`. Unknown periods are
///   rejected while the query string is parsed.
///
/// # Returns
/// - `200 OK` with the per-window counts and distributions.
/// - `400 Bad Request` for an unknown period.
pub async fn process(
    db: web::Data<Database>,
    _admin: AdminUser,
    query: web::Query<AnalyticsQuery>,
) -> ApiResult<HttpResponse> {
    let period = query.period.unwrap_or_default();
    let conn = db.lock().await;
    let analytics = tool_analytics(&conn, period)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(analytics)))
}

pub fn tool_analytics(conn: &Connection, period: AnalyticsPeriod) -> rusqlite::Result<ToolAnalytics> {
    Ok(ToolAnalytics {
        period,
        daily_submissions: daily_submissions(conn, period)?,
        category_distribution: category_distribution(conn)?,
        status_distribution: status_distribution(conn)?,
    })
}

/// Approved tools created inside the window, per UTC calendar day.
fn daily_submissions(conn: &Connection, period: AnalyticsPeriod) -> rusqlite::Result<Vec<DailyBucket>> {
    let since = timestamp(Utc::now() - Duration::days(period.days()));
    let mut stmt = conn.prepare(
        "SELECT substr(created_at, 1, 10) AS day, COUNT(*) FROM tools
         WHERE approved = 1 AND created_at >= ?1
         GROUP BY day
         ORDER BY day ASC",
    )?;
    let buckets = stmt
        .query_map(params![since], |row| {
            Ok(DailyBucket {
                date: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect();
    buckets
}

fn category_distribution(conn: &Connection) -> rusqlite::Result<Vec<CategoryDistribution>> {
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*), AVG(rating), SUM(view_count) FROM tools
         WHERE approved = 1
         GROUP BY category
         ORDER BY COUNT(*) DESC, category ASC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CategoryDistribution {
                category: row.get(0)?,
                count: row.get(1)?,
                average_rating: row.get(2)?,
                total_views: row.get(3)?,
            })
        })?
        .collect();
    rows
}

/// Counts every tool regardless of approval.
fn status_distribution(conn: &Connection) -> rusqlite::Result<Vec<StatusCount>> {
    let mut stmt = conn.prepare(
        "SELECT status, COUNT(*) FROM tools GROUP BY status ORDER BY COUNT(*) DESC, status ASC",
    )?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows
        .into_iter()
        .filter_map(|(status, count)| match status.parse::<ToolStatus>() {
            Ok(status) => Some(StatusCount { status, count }),
            Err(e) => {
                warn!("skipping status bucket: {}", e);
                None
            }
        })
        .collect())
}
