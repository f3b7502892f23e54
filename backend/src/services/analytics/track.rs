use crate::db::{is_object_id, Database};
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::requests::TrackRequest;
use common::responses::ApiResponse;
use log::info;
use rusqlite::params;
use validator::Validate;

/// Actix web handler for `POST /api/analytics/track`.
///
/// Fire-and-forget from the client's side: unknown tool ids and unknown
/// events are accepted and only logged.
///
/// # Arguments
/// * `payload` - The event name and an optional tool id.
///
/// # Returns
/// - `200 OK` once the event is recorded.
/// - `400 Bad Request` when the event name is missing.
pub async fn process(
    db: web::Data<Database>,
    payload: web::Json<TrackRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;

    let tool_id = payload.tool_id.as_deref().filter(|id| is_object_id(id));
    match (payload.event.as_str(), tool_id) {
        ("view", Some(tool_id)) => {
            let conn = db.lock().await;
            let updated = conn.execute(
                "UPDATE tools SET view_count = view_count + 1 WHERE id = ?1",
                params![tool_id],
            )?;
            if updated == 0 {
                info!("view tracked for unknown tool {}", tool_id);
            }
        }
        (event, tool_id) => {
            info!("event '{}' tracked (tool: {:?})", event, tool_id);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Event tracked")))
}
