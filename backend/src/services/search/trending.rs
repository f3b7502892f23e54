use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::model::search::TagCount;
use common::responses::ApiResponse;

/// Actix web handler for `GET /api/search/trending`: tags ranked by how many
/// approved tools carry them. The `tags` column is a JSON array, unpacked with
/// `json_each`.
///
/// # Returns
/// - `200 OK` with the ranked tags.
pub async fn process(db: web::Data<Database>) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    let mut stmt = conn.prepare(
        "SELECT tag.value, COUNT(*) AS uses
         FROM tools, json_each(tools.tags) AS tag
         WHERE tools.approved = 1
         GROUP BY tag.value
         ORDER BY uses DESC, tag.value ASC
         LIMIT 10",
    )?;
    let trending = stmt
        .query_map([], |row| {
            Ok(TagCount {
                tag: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(trending)))
}
