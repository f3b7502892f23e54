use crate::db::Database;
use crate::error::ApiResult;
use actix_web::{web, HttpResponse};
use common::model::tool::CategoryToolCount;
use common::responses::ApiResponse;

/// Actix web handler for `GET /api/tools/categories`.
///
/// # Returns
/// - `200 OK` with approved tools grouped by category name, largest group
///   first.
pub async fn process(db: web::Data<Database>) -> ApiResult<HttpResponse> {
    let conn = db.lock().await;
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*), AVG(rating) FROM tools
         WHERE approved = 1
         GROUP BY category
         ORDER BY COUNT(*) DESC, category ASC",
    )?;
    let groups = stmt
        .query_map([], |row| {
            Ok(CategoryToolCount {
                category: row.get(0)?,
                count: row.get(1)?,
                average_rating: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(groups)))
}
