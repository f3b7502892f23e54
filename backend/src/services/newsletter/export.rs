use crate::auth::AdminUser;
use crate::db::rows::{subscriber_from_row, SUBSCRIBER_COLUMNS};
use crate::db::{timestamp, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::model::newsletter::Subscriber;
use log::info;

/// Actix web handler for `GET /api/newsletter/export` (admin).
///
/// Active subscribers as CSV with the columns
/// `email,interests,source,subscribedAt`. Interests are joined with `;` inside
/// their cell.
///
/// # Returns
/// - `200 OK` with a `text/csv` attachment.
pub async fn process(db: web::Data<Database>, admin: AdminUser) -> ApiResult<HttpResponse> {
    let subscribers = {
        let conn = db.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM newsletter_subscribers WHERE is_active = 1 ORDER BY subscribed_at DESC",
            SUBSCRIBER_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], subscriber_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows
    };

    let body = to_csv(&subscribers).map_err(|e| ApiError::Internal(format!("csv export: {}", e)))?;
    info!("{} exported {} subscribers", admin.0.id, subscribers.len());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(
                "newsletter-subscribers.csv".to_string(),
            )],
        })
        .body(body))
}

fn to_csv(subscribers: &[Subscriber]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["email", "interests", "source", "subscribedAt"])?;
    for subscriber in subscribers {
        let interests = subscriber
            .interests
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let subscribed_at = timestamp(subscriber.subscribed_at);
        writer.write_record([
            subscriber.email.as_str(),
            interests.as_str(),
            subscriber.source.as_deref().unwrap_or(""),
            subscribed_at.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| e.error().to_string().into())
}
