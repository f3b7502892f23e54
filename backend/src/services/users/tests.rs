use crate::auth::USER_HEADER;
use crate::config::Config;
use crate::testing::{database, seed_user, ToolSeed};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_register_and_duplicate_email() {
    let db = database();
    let app = test_app!(db);

    let register = |email: &str| {
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(json!({"email": email, "username": "newbie"}))
            .to_request()
    };

    let resp = test::call_service(&app, register("New@Example.com")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "new@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["isActive"], true);
    assert_eq!(body["data"]["loginCount"], 0);

    let resp = test::call_service(&app, register("new@example.com")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_register_refuses_clerk_id() {
    let db = database();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({"email": "squatter@example.com", "username": "squatter", "clerkId": "user_2abc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "clerkId");

    let conn = db.lock().await;
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn test_register_with_admin_email_stays_user() {
    let db = database();
    let config = Config {
        admin_emails: vec!["owner@example.com".to_string()],
        ..Config::default()
    };
    let app = test::init_service(
        App::new().configure(|cfg| crate::services::configure(cfg, db.clone(), config.clone())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({"email": "owner@example.com", "username": "owner"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], "user");

    let req = test::TestRequest::get()
        .uri("/api/analytics/dashboard")
        .insert_header((USER_HEADER, body["data"]["id"].as_str().unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_counts_and_stamps() {
    let db = database();
    let user = seed_user(&db, "regular", "user").await;
    let app = test_app!(db);

    for expected in [1, 2] {
        let req = test::TestRequest::post()
            .uri("/api/users/login")
            .insert_header((USER_HEADER, user.clerk_id.clone().unwrap()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["loginCount"], expected);
        assert!(body["data"]["lastLogin"].is_string());
    }
}

#[actix_web::test]
async fn test_me_lists_interactions() {
    let db = database();
    let user = seed_user(&db, "collector", "user").await;
    let kept = ToolSeed::new("Kept", "Writing").insert(&db).await;
    let gone = ToolSeed::new("Gone", "Writing").insert(&db).await;
    let app = test_app!(db);

    for id in [&kept, &gone] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/tools/{}/bookmark", id))
            .insert_header((USER_HEADER, user.id.as_str()))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::post()
        .uri(&format!("/api/tools/{}/review", kept))
        .insert_header((USER_HEADER, user.id.as_str()))
        .set_json(json!({"rating": 5, "comment": "great"}))
        .to_request();
    test::call_service(&app, req).await;
    {
        let conn = db.lock().await;
        conn.execute("DELETE FROM tools WHERE id = ?1", rusqlite::params![gone])
            .unwrap();
    }

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header((USER_HEADER, user.id.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let data = &body["data"];
    assert_eq!(data["username"], "collector");
    assert_eq!(data["bookmarkedTools"].as_array().unwrap().len(), 1);
    assert_eq!(data["bookmarkedTools"][0]["id"], kept.as_str());
    assert_eq!(data["submittedTools"], json!([]));
    assert_eq!(data["reviews"][0]["tool"], kept.as_str());
    assert_eq!(data["reviews"][0]["rating"], 5);
}

#[actix_web::test]
async fn test_deactivated_account_is_rejected() {
    let db = database();
    let user = seed_user(&db, "leaver", "user").await;
    {
        let conn = db.lock().await;
        conn.execute(
            "UPDATE users SET is_active = 0 WHERE id = ?1",
            rusqlite::params![user.id],
        )
        .unwrap();
    }
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header((USER_HEADER, user.id.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Account is deactivated");
}
