use crate::auth::USER_HEADER;
use crate::testing::{database, seed_subscriber_at, seed_user};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_subscribe_new_then_duplicate() {
    let db = database();
    let app = test_app!(db);

    let subscribe = || {
        test::TestRequest::post()
            .uri("/api/newsletter/subscribe")
            .set_json(json!({"email": "Reader@Example.com", "interests": ["deals"], "source": "footer"}))
            .to_request()
    };

    let resp = test::call_service(&app, subscribe()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "reader@example.com");
    assert_eq!(body["data"]["interests"], json!(["deals"]));
    assert_eq!(body["data"]["isActive"], true);

    let resp = test::call_service(&app, subscribe()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email is already subscribed");
}

#[actix_web::test]
async fn test_unsubscribe_then_resubscribe_keeps_one_row() {
    let db = database();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/subscribe")
        .set_json(json!({"email": "loop@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/unsubscribe")
        .set_json(json!({"email": "loop@example.com", "reason": "too many emails"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/unsubscribe")
        .set_json(json!({"email": "loop@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/subscribe")
        .set_json(json!({"email": "loop@example.com", "interests": ["tutorials"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["isActive"], true);
    assert!(body["data"]["unsubscribedAt"].is_null());
    assert!(body["data"]["unsubscribeReason"].is_null());
    assert_eq!(body["data"]["interests"], json!(["tutorials"]));

    let conn = db.lock().await;
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM newsletter_subscribers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[actix_web::test]
async fn test_unsubscribe_unknown_and_invalid() {
    let db = database();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/unsubscribe")
        .set_json(json!({"email": "ghost@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/newsletter/subscribe")
        .set_json(json!({"email": "not-an-email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "email");
}

#[actix_web::test]
async fn test_subscriber_list_filters_and_paginates() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    let now = Utc::now();
    seed_subscriber_at(&db, "a@example.com", true, now - Duration::days(3)).await;
    seed_subscriber_at(&db, "b@example.com", true, now - Duration::days(2)).await;
    seed_subscriber_at(&db, "c@example.com", false, now - Duration::days(1)).await;
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/newsletter/subscribers?active=true&limit=1")
        .insert_header((USER_HEADER, admin.id.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["subscribers"][0]["email"], "b@example.com");
    assert_eq!(body["data"]["pagination"]["totalItems"], 2);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);

    let req = test::TestRequest::get()
        .uri("/api/newsletter/subscribers")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_stats() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    let now = Utc::now();
    seed_subscriber_at(&db, "a@example.com", true, now).await;
    seed_subscriber_at(&db, "b@example.com", true, now - Duration::days(45)).await;
    seed_subscriber_at(&db, "c@example.com", false, now).await;
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/newsletter/stats")
        .insert_header((USER_HEADER, admin.id.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        json!({
            "total": 3,
            "active": 2,
            "inactive": 1,
            "recentSubscriptions": 2,
            "interests": [{"interest": "new-tools", "count": 2}]
        })
    );
}

#[actix_web::test]
async fn test_export_csv_of_active_subscribers() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    seed_subscriber_at(&db, "keep@example.com", true, Utc::now()).await;
    seed_subscriber_at(&db, "left@example.com", false, Utc::now()).await;
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/newsletter/export")
        .insert_header((USER_HEADER, admin.id.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "email,interests,source,subscribedAt");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("keep@example.com,new-tools,,"));
}
