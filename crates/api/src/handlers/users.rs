//! Handlers for the `/user` resource: registration with OTP verification,
//! login/logout, password recovery, profile management, and the superAdmin
//! user-administration endpoints.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use leadhub_core::activity::ActivityAction;
use leadhub_core::error::CoreError;
use leadhub_core::pagination::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use leadhub_core::roles::ROLE_SUPPORT_AGENT;
use leadhub_core::types::DbId;
use leadhub_core::validation::{validate_role, MIN_NAME_LEN, MIN_PASSWORD_LEN, NAME_RE};
use leadhub_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use leadhub_db::repositories::{RoleRepo, UserRepo};
use leadhub_db::DbPool;

use crate::activity::record_activity;
use crate::auth::cookie::{build_expired_cookie, build_session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::mailer::deliver_otp;
use crate::middleware::rbac::{RequireActive, RequireSuperAdmin};
use crate::query::PageParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        regex(path = *NAME_RE, message = "Name must only contain letters and spaces"),
        length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long")
    )]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LEN, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: String,
}

/// Request body for `POST /user/verify-otp`.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Request body for `POST /user/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /user/forgotpassword`.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: String,
    #[validate(length(min = MIN_PASSWORD_LEN, message = "Password must be at least 6 characters long"))]
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Request body for `POST /user/create` (superAdmin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        regex(path = *NAME_RE, message = "Name must only contain letters and spaces"),
        length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long")
    )]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LEN, message = "Password must be at least 6 characters long"))]
    pub password: String,
    /// Defaults to `supportAgent` when absent.
    #[validate(custom(function = validate_role))]
    pub role: Option<String>,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: String,
}

/// Request body for `PUT /user/{id}` (superAdmin). Omitted fields keep their
/// previous values; activation changes go through the ops binary instead.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        regex(path = *NAME_RE, message = "Name must only contain letters and spaces"),
        length(min = MIN_NAME_LEN, message = "Name must be at least 3 characters long")
    )]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = validate_role))]
    pub role: Option<String>,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: Option<String>,
}

/// Successful login body; the token also travels in the session cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

/// Mutation body carrying the affected user.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

/// Body for `GET /user/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

/// Body for `PUT /user/profile/update`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub updated_user: UserResponse,
}

/// Body for `GET /user/`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub message: String,
    pub users: Vec<UserResponse>,
    pub total_users: i64,
}

// ---------------------------------------------------------------------------
// Registration / session handlers
// ---------------------------------------------------------------------------

/// POST /api/user/register
///
/// Stage a registration and send a one-time code to the email. No user row
/// is written until the code is verified.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;

    // 1. Reject emails that already belong to a persisted user.
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exist with this email.".into(),
        )));
    }

    // 2. Hash the password and stage the registration. Staging is atomic
    //    under the store lock, so the same email cannot be staged twice.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let otp = state
        .pending_registrations
        .stage(&input.email, input.name, password_hash, input.answer)
        .await
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "A registration is already pending for this email.".into(),
            ))
        })?;

    // 3. Hand the code to the mailer.
    deliver_otp(&state.mailer, &input.email, &otp)
        .await
        .map_err(|e| AppError::InternalError(format!("OTP delivery error: {e}")))?;

    tracing::info!(email = %input.email, "Registration staged, OTP sent");

    Ok(Json(MessageResponse::new(
        "OTP sent to your email. Please verify to complete registration.",
    )))
}

/// POST /api/user/verify-otp
///
/// Promote a staged registration to a persisted user. The staged entry is
/// consumed on success, so a second verification with the same code fails.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<UserEnvelope>> {
    // 1. Take the staged entry; a missing entry, a mismatched code, and an
    //    expired code each map to 400 with their own message.
    let pending = state
        .pending_registrations
        .take_verified(&input.email, &input.otp)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // 2. Self-registered users always get the supportAgent role.
    let role = RoleRepo::find_by_name(&state.pool, ROLE_SUPPORT_AGENT)
        .await?
        .ok_or_else(|| AppError::InternalError("supportAgent role is not seeded".into()))?;

    // 3. Persist the user; activation is a deployment choice.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: pending.name,
            email: input.email,
            password_hash: pending.password_hash,
            role_id: role.id,
            security_answer: pending.security_answer,
            is_active: state.config.activate_verified_users,
        },
    )
    .await?;

    record_activity(
        &state.pool,
        user.id,
        ActivityAction::Created,
        None,
        "Account Created",
    );
    tracing::info!(user_id = user.id, "Registration verified, user created");

    Ok(Json(UserEnvelope {
        message: "Account created successfully.".into(),
        user: UserResponse::from_user(user, role.name),
    }))
}

/// POST /api/user/login
///
/// Authenticate with email + password, setting the session cookie. A wrong
/// email and a wrong password share one message. Deactivated users may log
/// in; the activity gate turns them away from every other route.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. Look up the user.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("Incorrect email or password".into()))?;

    // 2. Verify the password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::BadRequest("Incorrect email or password".into()));
    }

    // 3. Issue the session token, delivered in the cookie and the body.
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let token = generate_token(user.id, &role_name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = build_session_cookie(&token, state.config.jwt.expiry_secs());

    tracing::info!(user_id = user.id, "User logged in");

    let message = format!("Welcome back {}", user.name);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message,
            user: UserResponse::from_user(user, role_name),
            token,
        }),
    ))
}

/// GET /api/user/logout
///
/// Overwrite the session cookie with an immediately expiring one. Succeeds
/// regardless of token state; there is no server-side session to revoke.
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, build_expired_cookie())],
        Json(MessageResponse::new("Logged Out Successfully")),
    )
}

/// POST /api/user/forgotpassword
///
/// Reset the password when the email and security answer match exactly.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;

    // 1. Both the email and the answer must match one user.
    let user = match UserRepo::find_by_email(&state.pool, &input.email).await? {
        Some(user) if user.security_answer == input.answer => user,
        _ => return Err(AppError::BadRequest("user not found".into())),
    };

    // 2. Hash and store the new password.
    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    record_activity(
        &state.pool,
        user.id,
        ActivityAction::Updated,
        None,
        "Password Reset",
    );
    tracing::info!(user_id = user.id, "Password reset via security answer");

    Ok(Json(MessageResponse::new("password changed successfully")))
}

// ---------------------------------------------------------------------------
// Profile handlers
// ---------------------------------------------------------------------------

/// GET /api/user/profile
///
/// The authenticated user's own record.
pub async fn get_profile(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    Ok(Json(ProfileResponse {
        user: UserResponse::from_user(user, role_name),
    }))
}

/// PUT /api/user/profile/update
///
/// Multipart form: a `name` text part plus an optional `profilePhoto` file.
/// The photo lands in the uploads directory and is served statically; the
/// previous photo file is removed best-effort.
pub async fn update_profile(
    RequireActive(auth): RequireActive,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProfileUpdateResponse>> {
    // 1. Pull the form parts.
    let mut name: Option<String> = None;
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let part = field.name().unwrap_or_default().to_string();
        match part.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "profilePhoto" => {
                let filename = field.file_name().unwrap_or("photo").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                photo = Some((filename, data));
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("name is required".into()))?;

    // 2. The current row, for the old-photo cleanup.
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    // 3. Store the new photo, if one was sent.
    let mut photo_url: Option<String> = None;
    if let Some((filename, data)) = photo {
        let stored = store_photo(&state.config.upload_dir, auth.user_id, &filename, &data).await?;

        if let Some(old_url) = &user.photo_url {
            if let Some(old_name) = old_url.rsplit('/').next() {
                let old_path = std::path::Path::new(&state.config.upload_dir).join(old_name);
                let _ = tokio::fs::remove_file(old_path).await;
            }
        }
        photo_url = Some(stored);
    }

    // 4. Apply the update.
    let updated = UserRepo::update_profile(&state.pool, auth.user_id, &name, photo_url.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let role_name = RoleRepo::resolve_name(&state.pool, updated.role_id).await?;

    record_activity(
        &state.pool,
        auth.user_id,
        ActivityAction::Updated,
        None,
        "Profile Updated",
    );
    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(ProfileUpdateResponse {
        message: "User Updated Successfully".into(),
        updated_user: UserResponse::from_user(updated, role_name),
    }))
}

// ---------------------------------------------------------------------------
// Admin user management (superAdmin)
// ---------------------------------------------------------------------------

/// POST /api/user/create
///
/// Admin-create a user with an explicit role. Newly created users start
/// inactive by default; activation is a deployment choice.
pub async fn create_user(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserEnvelope>)> {
    input.validate()?;

    let role_name = input.role.as_deref().unwrap_or(ROLE_SUPPORT_AGENT);
    let role = RoleRepo::find_by_name(&state.pool, role_name)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{role_name}' is not seeded")))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role_id: role.id,
            security_answer: input.answer,
            is_active: state.config.activate_created_users,
        },
    )
    .await?;

    record_activity(
        &state.pool,
        admin.user_id,
        ActivityAction::Created,
        None,
        "New User Created",
    );
    tracing::info!(user_id = user.id, admin_id = admin.user_id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "User created successfully".into(),
            user: UserResponse::from_user(user, role.name),
        }),
    ))
}

/// GET /api/user/
///
/// One page of users, most recently created first.
pub async fn list_users(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<UserListResponse>> {
    let page = pagination::normalize_page(params.page);
    let limit = pagination::clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = pagination::page_offset(page, limit);

    let rows = UserRepo::list(&state.pool, limit, offset).await?;
    let total_users = UserRepo::count(&state.pool).await?;
    let users = with_role_names(&state.pool, rows).await?;

    Ok(Json(UserListResponse {
        message: "Users fetched successfully".into(),
        users,
        total_users,
    }))
}

/// PUT /api/user/{id}
///
/// Admin edit of name/email/role/answer. There is no activation toggle here;
/// that path is the `set-user-status` ops binary.
pub async fn update_user(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserEnvelope>> {
    input.validate()?;

    // Role names arrive as client-facing strings; resolve to the seeded id.
    let role_id = match &input.role {
        Some(role) => Some(
            RoleRepo::find_by_name(&state.pool, role)
                .await?
                .ok_or_else(|| AppError::InternalError(format!("Role '{role}' is not seeded")))?
                .id,
        ),
        None => None,
    };

    let updated = UserRepo::update(
        &state.pool,
        user_id,
        &UpdateUser {
            name: input.name,
            email: input.email,
            role_id,
            security_answer: input.answer,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user_id,
    }))?;

    let role_name = RoleRepo::resolve_name(&state.pool, updated.role_id).await?;

    record_activity(
        &state.pool,
        admin.user_id,
        ActivityAction::Updated,
        None,
        "User Updated",
    );
    tracing::info!(user_id, admin_id = admin.user_id, "User updated");

    Ok(Json(UserEnvelope {
        message: "User updated successfully".into(),
        user: UserResponse::from_user(updated, role_name),
    }))
}

/// DELETE /api/user/{id}
///
/// Hard delete. Leads assigned to the user and comments they wrote keep
/// their loose references and populate as absent.
pub async fn delete_user(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = UserRepo::delete(&state.pool, user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    record_activity(
        &state.pool,
        admin.user_id,
        ActivityAction::Deleted,
        None,
        "User Deleted",
    );
    tracing::info!(user_id, admin_id = admin.user_id, "User deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// GET /api/user/support-agents
///
/// Unpaginated list of supportAgent users, used by assignment dropdowns.
/// Public, and a 404 when no agents exist.
pub async fn list_support_agents(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let role = RoleRepo::find_by_name(&state.pool, ROLE_SUPPORT_AGENT)
        .await?
        .ok_or_else(|| AppError::InternalError("supportAgent role is not seeded".into()))?;

    let agents = UserRepo::list_by_role(&state.pool, role.id).await?;
    if agents.is_empty() {
        return Err(AppError::NotFound("No support agents found".into()));
    }

    let agents = agents
        .into_iter()
        .map(|user| UserResponse::from_user(user, role.name.clone()))
        .collect();
    Ok(Json(agents))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write an uploaded photo into the uploads directory under a unique name,
/// returning the public URL path it is served from.
async fn store_photo(
    upload_dir: &str,
    user_id: DbId,
    original_name: &str,
    data: &[u8],
) -> Result<String, AppError> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let extension = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let stored_name = format!("{user_id}-{}.{extension}", uuid::Uuid::new_v4());

    let dest = std::path::Path::new(upload_dir).join(&stored_name);
    tokio::fs::write(&dest, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store photo: {e}")))?;

    Ok(format!("/uploads/{stored_name}"))
}

/// Resolve role names for a batch of user rows in one roles fetch.
async fn with_role_names(pool: &DbPool, rows: Vec<User>) -> Result<Vec<UserResponse>, AppError> {
    let roles = RoleRepo::name_map(pool).await?;

    Ok(rows
        .into_iter()
        .map(|user| {
            let role = roles
                .get(&user.role_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            UserResponse::from_user(user, role)
        })
        .collect())
}
