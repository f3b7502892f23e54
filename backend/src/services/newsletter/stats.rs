use crate::auth::AdminUser;
use crate::db::{timestamp, Database};
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use common::model::newsletter::{Interest, InterestCount, NewsletterStats};
use common::responses::ApiResponse;
use log::warn;
use rusqlite::params;

const RECENT_DAYS: i64 = 30;

/// Actix web handler for `GET /api/newsletter/stats` (admin). Interest counts
/// only consider active subscribers.
pub async fn process(db: web::Data<Database>, _admin: AdminUser) -> ApiResult<HttpResponse> {
    let since = timestamp(Utc::now() - Duration::days(RECENT_DAYS));
    let conn = db.lock().await;

    let (total, active, recent_subscriptions): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(is_active), 0),
                COALESCE(SUM(created_at >= ?1), 0)
         FROM newsletter_subscribers",
        params![since],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let mut stmt = conn.prepare(
        "SELECT interest.value, COUNT(*) AS picks
         FROM newsletter_subscribers, json_each(newsletter_subscribers.interests) AS interest
         WHERE newsletter_subscribers.is_active = 1
         GROUP BY interest.value
         ORDER BY picks DESC, interest.value ASC",
    )?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    let interests = rows
        .into_iter()
        .filter_map(|(interest, count)| match interest.parse::<Interest>() {
            Ok(interest) => Some(InterestCount { interest, count }),
            Err(e) => {
                warn!("skipping interest bucket: {}", e);
                None
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(NewsletterStats {
        total,
        active,
        inactive: total - active,
        recent_subscriptions,
        interests,
    })))
}
