use crate::auth::USER_HEADER;
use crate::testing::{database, seed_user, tool_counter, ToolSeed};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_listing_only_returns_approved_tools() {
    let db = database();
    ToolSeed::new("Visible", "Writing").insert(&db).await;
    ToolSeed::new("Hidden", "Writing").unapproved().insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/tools").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    let tools = body["data"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "Visible");
    assert_eq!(body["data"]["pagination"]["totalItems"], 1);
}

#[actix_web::test]
async fn test_listing_pagination_metadata() {
    let db = database();
    for i in 0..5 {
        ToolSeed::new(&format!("Tool {}", i), "Writing").insert(&db).await;
    }
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/tools?page=2&limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let pagination = &body["data"]["pagination"];
    assert_eq!(body["data"]["tools"].as_array().unwrap().len(), 2);
    assert_eq!(pagination["currentPage"], 2);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["totalItems"], 5);
    assert_eq!(pagination["itemsPerPage"], 2);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], true);
}

#[actix_web::test]
async fn test_listing_filters_and_sorts() {
    let db = database();
    ToolSeed::new("Alpha", "Writing").views(3).insert(&db).await;
    ToolSeed::new("Beta", "Writing").views(10).status("Paid").insert(&db).await;
    ToolSeed::new("Gamma", "Images").views(50).insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/tools?category=Writing&sort=popular")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body["data"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beta", "Alpha"]);

    let req = test::TestRequest::get()
        .uri("/api/tools?status=Paid")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["tools"][0]["name"], "Beta");
    assert_eq!(body["data"]["pagination"]["totalItems"], 1);
}

#[actix_web::test]
async fn test_default_sort_puts_featured_first() {
    let db = database();
    ToolSeed::new("Rated", "Writing").rating(4.9, 10).insert(&db).await;
    ToolSeed::new("Promoted", "Writing").featured().rating(3.0, 2).insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/tools").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["tools"][0]["name"], "Promoted");
    assert_eq!(body["data"]["tools"][1]["name"], "Rated");
}

#[actix_web::test]
async fn test_listing_rejects_out_of_range_limit() {
    let db = database();
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/tools?limit=500").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "limit");
}

#[actix_web::test]
async fn test_featured_and_category_counts() {
    let db = database();
    ToolSeed::new("One", "Writing").featured().rating(4.0, 1).insert(&db).await;
    ToolSeed::new("Two", "Writing").featured().rating(5.0, 1).insert(&db).await;
    ToolSeed::new("Three", "Images").rating(3.0, 1).insert(&db).await;
    ToolSeed::new("Four", "Images").featured().unapproved().insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/tools/featured").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let featured = body["data"].as_array().unwrap();
    assert_eq!(featured.len(), 2);
    assert_eq!(featured[0]["name"], "Two");

    let req = test::TestRequest::get().uri("/api/tools/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        json!([
            {"category": "Writing", "count": 2, "averageRating": 4.5},
            {"category": "Images", "count": 1, "averageRating": 3.0}
        ])
    );
}

#[actix_web::test]
async fn test_two_reads_add_two_views() {
    let db = database();
    let id = ToolSeed::new("Counter", "Writing").views(7).insert(&db).await;
    let app = test_app!(db);

    for expected in [8, 9] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/tools/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["viewCount"], expected);
    }
    assert_eq!(tool_counter(&db, &id, "view_count").await, 9);
}

#[actix_web::test]
async fn test_read_distinguishes_bad_and_missing_ids() {
    let db = database();
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/tools/not-an-id").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/tools/65a1f0c2b3d4e5f60718293a")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Tool not found");
}

fn submission(name: &str) -> Value {
    json!({
        "name": name,
        "category": "Writing",
        "description": "Drafts blog posts from an outline",
        "link": "https://drafter.example.com",
        "tags": ["writing", " blog ", "writing"],
        "pricing": "Active deal"
    })
}

#[actix_web::test]
async fn test_submission_is_unapproved_and_recorded_for_submitter() {
    let db = database();
    let user = seed_user(&db, "maker", "user").await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .insert_header((USER_HEADER, user.id.as_str()))
        .set_json(submission("Drafter"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let tool = &body["data"];
    assert_eq!(tool["approved"], false);
    assert_eq!(tool["slug"], "drafter");
    assert_eq!(tool["pricing"], "Active deal");
    assert_eq!(tool["tags"], json!(["writing", "blog"]));
    assert_eq!(tool["submittedBy"], user.id.as_str());

    let conn = db.lock().await;
    let recorded: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM user_submitted_tools WHERE user_id = ?1 AND tool_id = ?2",
            rusqlite::params![user.id, tool["id"].as_str().unwrap()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(recorded, 1);
}

#[actix_web::test]
async fn test_submission_validation_and_duplicates() {
    let db = database();
    ToolSeed::new("Drafter", "Writing").insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .set_json(json!({"name": "D", "link": "nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["category", "description", "link", "name"]);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .set_json(submission("Drafter"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "A tool with this name already exists");
}

#[actix_web::test]
async fn test_padded_name_is_measured_trimmed() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    let id = ToolSeed::new("Drafter", "Writing").insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .set_json(submission("  X  "))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "name");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tools/{}", id))
        .insert_header((USER_HEADER, admin.id.as_str()))
        .set_json(json!({"name": " Y "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "name");
}

#[actix_web::test]
async fn test_submit_then_approve_makes_tool_listed() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/tools")
        .set_json(submission("Drafter"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri("/api/tools").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["totalItems"], 0);

    let req = test::TestRequest::put()
        .uri(&format!("/api/tools/{}/approve", id))
        .insert_header((USER_HEADER, admin.clerk_id.clone().unwrap()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["approved"], true);
    assert_eq!(body["data"]["approvedBy"], admin.id.as_str());
    assert!(body["data"]["approvedAt"].is_string());

    let req = test::TestRequest::get().uri("/api/tools").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["tools"][0]["id"], id.as_str());
}

#[actix_web::test]
async fn test_admin_routes_reject_non_admins() {
    let db = database();
    let id = ToolSeed::new("Guarded", "Writing").insert(&db).await;
    let user = seed_user(&db, "pleb", "user").await;
    let app = test_app!(db);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tools/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tools/{}", id))
        .insert_header((USER_HEADER, user.id.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Admin access required");
}

#[actix_web::test]
async fn test_update_unapprove_clears_stamps_and_renames() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    let id = ToolSeed::new("Old Name", "Writing").unapproved().insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::put()
        .uri(&format!("/api/tools/{}", id))
        .insert_header((USER_HEADER, admin.id.as_str()))
        .set_json(json!({"approved": true, "name": "New Name", "featured": true}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["slug"], "new-name");
    assert_eq!(body["data"]["featured"], true);
    assert_eq!(body["data"]["approvedBy"], admin.id.as_str());

    let req = test::TestRequest::put()
        .uri(&format!("/api/tools/{}", id))
        .insert_header((USER_HEADER, admin.id.as_str()))
        .set_json(json!({"approved": false}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["approved"], false);
    assert!(body["data"]["approvedBy"].is_null());
    assert!(body["data"]["approvedAt"].is_null());
}

#[actix_web::test]
async fn test_delete_then_missing() {
    let db = database();
    let admin = seed_user(&db, "boss", "admin").await;
    let id = ToolSeed::new("Doomed", "Writing").insert(&db).await;
    let app = test_app!(db);

    for expected in [StatusCode::OK, StatusCode::NOT_FOUND] {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/tools/{}", id))
            .insert_header((USER_HEADER, admin.id.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_bookmark_toggle_restores_state() {
    let db = database();
    let user = seed_user(&db, "reader", "user").await;
    let id = ToolSeed::new("Saved", "Writing").bookmarks(4).insert(&db).await;
    let app = test_app!(db);

    let toggle = || {
        test::TestRequest::post()
            .uri(&format!("/api/tools/{}/bookmark", id))
            .insert_header((USER_HEADER, user.id.as_str()))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, toggle()).await;
    assert_eq!(body["data"], json!({"bookmarked": true, "bookmarkCount": 5}));

    let body: Value = test::call_and_read_body_json(&app, toggle()).await;
    assert_eq!(body["data"], json!({"bookmarked": false, "bookmarkCount": 4}));

    let conn = db.lock().await;
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_bookmarks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[actix_web::test]
async fn test_unbookmark_never_goes_negative() {
    let db = database();
    let user = seed_user(&db, "reader", "user").await;
    let id = ToolSeed::new("Drifted", "Writing").insert(&db).await;
    {
        let conn = db.lock().await;
        conn.execute(
            "INSERT INTO user_bookmarks (user_id, tool_id, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![user.id, id, crate::db::timestamp(Utc::now())],
        )
        .unwrap();
    }
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tools/{}/bookmark", id))
        .insert_header((USER_HEADER, user.id.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["bookmarkCount"], 0);
}

#[actix_web::test]
async fn test_bookmark_requires_identity() {
    let db = database();
    let id = ToolSeed::new("Saved", "Writing").insert(&db).await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tools/{}/bookmark", id))
        .insert_header((USER_HEADER, "user_nobody"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_second_review_replaces_the_first() {
    let db = database();
    let user = seed_user(&db, "critic", "user").await;
    let id = ToolSeed::new("Judged", "Writing").rating(4.0, 2).insert(&db).await;
    let app = test_app!(db);

    let review = |rating: u8| {
        test::TestRequest::post()
            .uri(&format!("/api/tools/{}/review", id))
            .insert_header((USER_HEADER, user.id.as_str()))
            .set_json(json!({"rating": rating, "comment": "solid"}))
            .to_request()
    };

    // (4.0 * 2 + 1) / 3
    let body: Value = test::call_and_read_body_json(&app, review(1)).await;
    assert_eq!(body["data"], json!({"rating": 3.0, "reviewCount": 3}));

    // (3.0 * 3 - 1 + 4) / 3
    let body: Value = test::call_and_read_body_json(&app, review(4)).await;
    assert_eq!(body["data"], json!({"rating": 4.0, "reviewCount": 3}));

    let conn = db.lock().await;
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM user_reviews WHERE user_id = ?1",
            rusqlite::params![user.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[actix_web::test]
async fn test_review_rating_out_of_range() {
    let db = database();
    let user = seed_user(&db, "critic", "user").await;
    let id = ToolSeed::new("Judged", "Writing")
        .created_at(Utc::now() - Duration::days(3))
        .insert(&db)
        .await;
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tools/{}/review", id))
        .insert_header((USER_HEADER, user.id.as_str()))
        .set_json(json!({"rating": 9}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "rating");
    assert_eq!(tool_counter(&db, &id, "review_count").await, 0);
}
