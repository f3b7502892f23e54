use crate::auth::AdminUser;
use crate::db::rows::{subscriber_from_row, SUBSCRIBER_COLUMNS};
use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::requests::SubscriberListQuery;
use common::responses::{ApiResponse, Pagination, SubscriberPage};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use validator::Validate;

const DEFAULT_LIMIT: u32 = 50;

/// Actix web handler for `GET /api/newsletter/subscribers` (admin).
///
/// # Arguments
/// * `query` - Paging plus an optional `active` filter.
///
/// # Returns
/// - `200 OK` with one page of subscribers, newest first.
/// - `400 Bad Request` when the paging is out of range.
pub async fn process(
    db: web::Data<Database>,
    _admin: AdminUser,
    query: web::Query<SubscriberListQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let (filter, args) = match query.active {
        Some(active) => ("WHERE is_active = ?1", vec![Value::Integer(active.into())]),
        None => ("", Vec::new()),
    };

    let conn = db.lock().await;
    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM newsletter_subscribers {}", filter),
        params_from_iter(args.iter()),
        |row| row.get(0),
    )?;
    let pagination = Pagination::new(page, limit, total as u64).with_navigation();

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM newsletter_subscribers {} ORDER BY subscribed_at DESC LIMIT {} OFFSET {}",
        SUBSCRIBER_COLUMNS,
        filter,
        pagination.items_per_page,
        pagination.offset()
    ))?;
    let subscribers = stmt
        .query_map(params_from_iter(args.iter()), subscriber_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(SubscriberPage {
        subscribers,
        pagination,
    })))
}
