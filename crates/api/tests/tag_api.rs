//! HTTP-level integration tests for tag CRUD and its RBAC rules.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth};
use leadhub_api::auth::password::hash_password;
use leadhub_db::models::lead::CreateLead;
use leadhub_db::models::user::CreateUser;
use leadhub_db::repositories::{LeadRepo, TagRepo, UserRepo};
use sqlx::PgPool;

const SUPER_ADMIN: i64 = 1;
const SUPPORT_AGENT: i64 = 3;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create an active user with the given role and return a Bearer token.
async fn seed_token(pool: &PgPool, email: &str, role_id: i64) -> String {
    let password = "test_password_123";
    let input = CreateUser {
        name: "Tag Tester".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
        role_id,
        security_answer: "blue".to_string(),
        is_active: true,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/user/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().expect("login returns a token").to_string()
}

// ---------------------------------------------------------------------------
// Create and uniqueness
// ---------------------------------------------------------------------------

/// Any active user can create a tag; the response carries the new row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_tag(pool: PgPool) {
    let token = seed_token(&pool, "tagger@test.com", SUPPORT_AGENT).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Enterprise" });
    let response = post_json_auth(app, "/api/tag/tags", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tag created successfully");
    assert_eq!(json["tag"]["name"], "Enterprise");
    assert!(json["tag"]["id"].is_number());
}

/// Tag names are unique; a duplicate is a 400 CONFLICT.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_duplicate_tag_conflicts(pool: PgPool) {
    let token = seed_token(&pool, "dup@test.com", SUPPORT_AGENT).await;
    TagRepo::create(&pool, "Existing").await.unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Existing" });
    let response = post_json_auth(app, "/api/tag/tags", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["message"], "Tag already exists");
}

/// Tag names follow the shared name rules (letters and spaces, length 3+).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_tag_validates_name(pool: PgPool) {
    let token = seed_token(&pool, "valid@test.com", SUPPORT_AGENT).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "x1" });
    let response = post_json_auth(app, "/api/tag/tags", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// List and get
// ---------------------------------------------------------------------------

/// The tag list is paginated and reports the current page.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_tags_paginates(pool: PgPool) {
    let token = seed_token(&pool, "taglist@test.com", SUPPORT_AGENT).await;
    for name in ["Alpha", "Beta", "Gamma"] {
        TagRepo::create(&pool, name).await.unwrap();
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/tag/tags?page=2&limit=2", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tags fetched successfully");
    assert_eq!(json["totalTags"], 3);
    assert_eq!(json["currentPage"], 2);
    assert_eq!(json["tags"].as_array().unwrap().len(), 1);
}

/// Fetching a missing tag returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_tag_not_found(pool: PgPool) {
    let token = seed_token(&pool, "tag404@test.com", SUPPORT_AGENT).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/tag/tags/999999", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tag not found");
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

/// Renaming a tag is visible from the lead that carries it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_tag(pool: PgPool) {
    let token = seed_token(&pool, "rename@test.com", SUPPORT_AGENT).await;
    let tag = TagRepo::create(&pool, "Misspeled").await.unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Misspelled" });
    let response = put_json_auth(app, &format!("/api/tag/tags/{}", tag.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tag updated successfully");
    assert_eq!(json["tag"]["name"], "Misspelled");
}

/// Deleting a tag requires the superAdmin role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_tag_requires_super_admin(pool: PgPool) {
    let agent_token = seed_token(&pool, "agent@test.com", SUPPORT_AGENT).await;
    let admin_token = seed_token(&pool, "admin@test.com", SUPER_ADMIN).await;
    let tag = TagRepo::create(&pool, "Protected").await.unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/tag/tags/{}", tag.id), &agent_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/tag/tags/{}", tag.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tag deleted successfully");
}

/// Deleting a tag detaches it from leads without touching the leads.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_tag_keeps_leads(pool: PgPool) {
    let admin_token = seed_token(&pool, "cascade@test.com", SUPER_ADMIN).await;
    let tag = TagRepo::create(&pool, "Ephemeral").await.unwrap();

    let input = CreateLead {
        name: "Tag Carrier".to_string(),
        email: "carrier@lead.com".to_string(),
        phone: "5550009999".to_string(),
        source: "website".to_string(),
        status: None,
        assigned_to: None,
        tags: vec![tag.id],
    };
    let lead = LeadRepo::create(&pool, &input).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/tag/tags/{}", tag.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The lead survives with an empty tag list.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/lead/leads/{}", lead.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["lead"]["name"], "Tag Carrier");
    assert!(json["lead"]["tags"].as_array().unwrap().is_empty());
}
