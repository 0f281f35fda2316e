//! HTTP-level integration tests for superAdmin user management and the
//! role/activation gates.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth};
use leadhub_api::auth::password::hash_password;
use leadhub_db::models::user::CreateUser;
use leadhub_db::repositories::UserRepo;
use sqlx::PgPool;

const SUPER_ADMIN: i64 = 1;
const SUB_ADMIN: i64 = 2;
const SUPPORT_AGENT: i64 = 3;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create an active user with the given role and return the row plus a
/// Bearer token.
async fn seed_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    role_id: i64,
) -> (leadhub_db::models::user::User, String) {
    let password = "test_password_123";
    let input = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
        role_id,
        security_answer: "blue".to_string(),
        is_active: true,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/user/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["token"].as_str().expect("login returns a token").to_string();
    (user, token)
}

// ---------------------------------------------------------------------------
// RBAC gates
// ---------------------------------------------------------------------------

/// Admin endpoints require authentication -- missing token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_user_list_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/user").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Neither supportAgent nor subAdmin may reach superAdmin-only routes.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_user_list_requires_super_admin(pool: PgPool) {
    let (_agent, agent_token) = seed_user(&pool, "Agent", "agent@test.com", SUPPORT_AGENT).await;
    let (_sub, sub_token) = seed_user(&pool, "Sub Admin", "sub@test.com", SUB_ADMIN).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/user", &agent_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"], "SuperAdmin role required");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/user", &sub_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Deactivation is enforced per request, even with a still-valid token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivated_admin_is_blocked(pool: PgPool) {
    let (admin, token) = seed_user(&pool, "Fallen Admin", "fallen@test.com", SUPER_ADMIN).await;

    UserRepo::set_active(&pool, admin.id, false)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/user", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Account is deactivated");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// superAdmin creates a user; the default role is supportAgent and the
/// account starts deactivated until an operator flips it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_user(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss@test.com", SUPER_ADMIN).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Fresh Agent",
        "email": "fresh@test.com",
        "password": "secret123",
        "answer": "blue"
    });
    let response = post_json_auth(app, "/api/user/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["user"]["email"], "fresh@test.com");
    assert_eq!(json["user"]["role"], "supportAgent");
    assert_eq!(json["user"]["isActive"], false);

    let row = UserRepo::find_by_email(&pool, "fresh@test.com")
        .await
        .unwrap()
        .expect("created user must exist");
    assert!(!row.is_active);
}

/// With ACTIVATE_CREATED_USERS enabled, admin-created accounts start active.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_user_activation_flag(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss2@test.com", SUPER_ADMIN).await;

    let mut config = common::test_config();
    config.activate_created_users = true;

    let app = common::build_test_app_with_config(pool.clone(), config);
    let body = serde_json::json!({
        "name": "Instant Agent",
        "email": "instant@test.com",
        "password": "secret123",
        "role": "subAdmin",
        "answer": "blue"
    });
    let response = post_json_auth(app, "/api/user/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "subAdmin");
    assert_eq!(json["user"]["isActive"], true);
}

/// Creating a user with a taken email is a 400 CONFLICT.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_duplicate_email(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss3@test.com", SUPER_ADMIN).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Copy Cat",
        "email": "boss3@test.com",
        "password": "secret123",
        "answer": "blue"
    });
    let response = post_json_auth(app, "/api/user/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["message"], "User already exist with this email.");
}

/// An unknown role name fails validation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_create_rejects_unknown_role(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss4@test.com", SUPER_ADMIN).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Role Probe",
        "email": "probe@test.com",
        "password": "secret123",
        "role": "root",
        "answer": "blue"
    });
    let response = post_json_auth(app, "/api/user/create", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// List, update, delete
// ---------------------------------------------------------------------------

/// The user list is paginated and carries resolved role names.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_list_users(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss5@test.com", SUPER_ADMIN).await;
    seed_user(&pool, "Listed Agent", "listed@test.com", SUPPORT_AGENT).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/user?page=1&limit=10", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Users fetched successfully");
    assert_eq!(json["totalUsers"], 2);
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["role"].is_string()));
}

/// superAdmin edits another account, including its role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_update_user(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss6@test.com", SUPER_ADMIN).await;
    let (target, _target_token) =
        seed_user(&pool, "Target User", "target@test.com", SUPPORT_AGENT).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Promoted User", "role": "subAdmin" });
    let response = put_json_auth(app, &format!("/api/user/{}", target.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User updated successfully");
    assert_eq!(json["user"]["name"], "Promoted User");
    assert_eq!(json["user"]["role"], "subAdmin");
}

/// Updating a missing user returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_update_missing_user(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss7@test.com", SUPER_ADMIN).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Nobody" });
    let response = put_json_auth(app, "/api/user/999999", body, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User not found");
}

/// superAdmin deletes an account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_delete_user(pool: PgPool) {
    let (_admin, token) = seed_user(&pool, "The Admin", "boss8@test.com", SUPER_ADMIN).await;
    let (target, _target_token) =
        seed_user(&pool, "Doomed User", "doomed@test.com", SUPPORT_AGENT).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/user/{}", target.id), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User deleted successfully");

    let gone = UserRepo::find_by_id(&pool, target.id).await.unwrap();
    assert!(gone.is_none(), "deleted user must not remain");
}

// ---------------------------------------------------------------------------
// Support agents
// ---------------------------------------------------------------------------

/// The support-agent directory is public and lists only that role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_support_agents_listing(pool: PgPool) {
    seed_user(&pool, "Visible Agent", "visible@test.com", SUPPORT_AGENT).await;
    seed_user(&pool, "Hidden Admin", "hidden@test.com", SUPER_ADMIN).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/user/support-agents").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let agents = json.as_array().expect("response body should be an array");
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["name"], "Visible Agent");
    assert_eq!(agents[0]["role"], "supportAgent");
}

/// With no support agents at all the endpoint reports 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_support_agents_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/user/support-agents").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No support agents found");
}
