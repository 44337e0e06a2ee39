//! Handlers for the `/auth` resource (signup, login, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use herbanet_core::error::CoreError;
use herbanet_core::roles::ROLE_CUSTOMER;
use herbanet_core::types::DbId;
use herbanet_db::models::user::{CreateUser, User, UserResponse};
use herbanet_db::repositories::{RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum password length enforced on signup and user creation.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Response body for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// The caller's effective privilege codes (role plus direct grants).
    pub privileges: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Public self-registration. New accounts always get the CUSTOMER role;
/// staff roles are assigned through the admin surface.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = RoleRepo::find_by_name(&state.pool, ROLE_CUSTOMER)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Internal(
                "CUSTOMER role missing from reference data".into(),
            ))
        })?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        role_id: role.id,
    };

    // A username collision surfaces as a 23505 on uq_users_username; give
    // it a friendlier message than the generic constraint report.
    let user = UserRepo::create(&state.pool, &create_dto)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Core(CoreError::Duplicate(format!(
                    "Username {} is already taken",
                    create_dto.username
                )))
            }
            _ => AppError::Database(e),
        })?;

    let response = build_auth_response(&state, &user, &role.name)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by username. The failure message never reveals whether
    //    the username exists.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Check the account is active.
    if !user.active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 4. Resolve role name for the token claims.
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let response = build_auth_response(&state, &user, &role_name)?;
    Ok(Json(response))
}

/// GET /api/v1/auth/me
///
/// The caller's profile plus their effective privilege set.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let privileges = UserRepo::effective_privilege_codes(&state.pool, user.id).await?;

    Ok(Json(MeResponse {
        user: user_response(&user, role_name),
        privileges,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate the access token and assemble the auth response.
fn build_auth_response(
    state: &AppState,
    user: &User,
    role_name: &str,
) -> Result<AuthResponse, AppError> {
    let access_token = generate_access_token(user.id, role_name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        expires_in,
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: role_name.to_string(),
        },
    })
}

/// Convert a [`User`] row into a safe [`UserResponse`].
pub fn user_response(user: &User, role_name: String) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        role: role_name,
        role_id: user.role_id,
        active: user.active,
        created_at: user.created_at,
    }
}
