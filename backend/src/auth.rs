//! Caller identity extractors.
//!
//! Authentication happens upstream (the identity provider's session proxy);
//! it forwards the caller's subject in the `X-User-Id` header. The subject is
//! either the user's own id or their identity-provider id.

use crate::db::rows::find_user_by_subject;
use crate::db::Database;
use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use common::model::user::User;
use futures_util::future::LocalBoxFuture;

pub const USER_HEADER: &str = "X-User-Id";

fn subject(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

async fn resolve(db: Option<web::Data<Database>>, subject: Option<String>) -> Result<User, ApiError> {
    let db = db.ok_or_else(|| ApiError::Internal("database is not configured".to_string()))?;
    let subject =
        subject.ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    let conn = db.lock().await;
    let user = find_user_by_subject(&conn, &subject)?
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
    }
    Ok(user)
}

/// An active, identified caller. Rejects with 401 otherwise.
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let db = req.app_data::<web::Data<Database>>().cloned();
        let subject = subject(req);
        Box::pin(async move { resolve(db, subject).await.map(CurrentUser) })
    }
}

/// The caller if one is identified and active; anonymous otherwise.
pub struct OptionalUser(pub Option<User>);

impl FromRequest for OptionalUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let db = req.app_data::<web::Data<Database>>().cloned();
        let subject = subject(req);
        Box::pin(async move {
            match resolve(db, subject).await {
                Ok(user) => Ok(OptionalUser(Some(user))),
                Err(ApiError::Unauthorized(_)) => Ok(OptionalUser(None)),
                Err(e) => Err(e),
            }
        })
    }
}

/// An active caller with the admin role.
pub struct AdminUser(pub User);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let db = req.app_data::<web::Data<Database>>().cloned();
        let subject = subject(req);
        Box::pin(async move {
            let user = resolve(db, subject).await?;
            if !user.is_admin() {
                return Err(ApiError::Unauthorized("Admin access required".to_string()));
            }
            Ok(AdminUser(user))
        })
    }
}
