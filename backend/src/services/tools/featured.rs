use crate::db::rows::{query_tools, TOOL_COLUMNS};
use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::responses::ApiResponse;

/// Actix web handler for `GET /api/tools/featured`: the ten best-rated
/// approved, featured tools.
pub async fn process(db: web::Data<Database>) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    let tools = query_tools(
        &conn,
        &format!(
            "SELECT {} FROM tools WHERE approved = 1 AND featured = 1
             ORDER BY rating DESC LIMIT 10",
            TOOL_COLUMNS
        ),
        [],
    )?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tools)))
}
