//! Handlers for the `/admin` resource (user, role, and privilege
//! management).
//!
//! All handlers require the `MANAGE_USERS` privilege.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use herbanet_core::error::CoreError;
use herbanet_core::privileges::MANAGE_USERS;
use herbanet_core::types::DbId;
use herbanet_db::models::privilege::Privilege;
use herbanet_db::models::role::RoleWithPrivileges;
use herbanet_db::models::user::{CreateUser, UpdateUser, UserResponse};
use herbanet_db::repositories::{PrivilegeRepo, RoleRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::{user_response, MIN_PASSWORD_LENGTH};
use crate::middleware::auth::AuthUser;
use crate::middleware::privileges::require_privilege;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: String,
    /// Role name, e.g. `"RECEPTIONIST"`. Fails with 404 when unknown.
    pub role: String,
    /// Directly-granted privilege codes; unknown codes are dropped.
    #[serde(default)]
    pub privileges: Vec<String>,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// New role name, resolved before the update is applied.
    pub role: Option<String>,
    pub active: Option<bool>,
}

/// Request body for the replace-set privilege endpoints.
#[derive(Debug, Deserialize)]
pub struct AssignPrivilegesRequest {
    pub codes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a user with an arbitrary role and optional direct privilege
/// grants. Returns a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = RoleRepo::find_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::RoleNotFound(input.role.clone())))?;

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

    let user = UserRepo::create(&state.pool, &create_dto).await?;

    if !input.privileges.is_empty() {
        let ids = PrivilegeRepo::ids_for_codes(&state.pool, &input.privileges).await?;
        UserRepo::set_privileges(&state.pool, user.id, &ids).await?;
    }

    Ok((StatusCode::CREATED, Json(user_response(&user, role.name))))
}

/// GET /api/v1/admin/users
///
/// List all users with resolved role names.
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let users = UserRepo::list(&state.pool).await?;

    // Pre-fetch all roles to avoid N+1 queries.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .map(|u| {
            let role_name = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            user_response(u, role_name)
        })
        .collect();

    Ok(Json(responses))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's profile fields and/or role (not password).
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let role_id = match &input.role {
        Some(name) => Some(
            RoleRepo::find_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| AppError::Core(CoreError::RoleNotFound(name.clone())))?
                .id,
        ),
        None => None,
    };

    let update_dto = UpdateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        role_id,
        active: input.active,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(user_response(&user, role_name)))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivate a user (`active = false`). Users are never deleted.
/// Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// PUT /api/v1/admin/users/{id}/privileges
///
/// Replace the user's directly-granted privilege set. Unknown codes are
/// silently dropped. Returns 204 No Content.
pub async fn assign_user_privileges(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AssignPrivilegesRequest>,
) -> AppResult<StatusCode> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let ids = PrivilegeRepo::ids_for_codes(&state.pool, &input.codes).await?;
    UserRepo::set_privileges(&state.pool, user.id, &ids).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/roles
///
/// List all roles with their granted privileges resolved.
pub async fn list_roles(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<RoleWithPrivileges>>> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let roles = RoleRepo::list(&state.pool).await?;

    let mut out = Vec::with_capacity(roles.len());
    for role in roles {
        let privileges = RoleRepo::privileges_of(&state.pool, role.id).await?;
        out.push(RoleWithPrivileges {
            id: role.id,
            name: role.name,
            privileges,
        });
    }

    Ok(Json(out))
}

/// PUT /api/v1/admin/roles/{id}/privileges
///
/// Replace a role's privilege set. Unknown codes are silently dropped.
/// Returns 204 No Content.
pub async fn assign_role_privileges(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AssignPrivilegesRequest>,
) -> AppResult<StatusCode> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;

    let ids = PrivilegeRepo::ids_for_codes(&state.pool, &input.codes).await?;
    RoleRepo::set_privileges(&state.pool, role.id, &ids).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/privileges
///
/// List the seeded privilege reference data.
pub async fn list_privileges(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Privilege>>> {
    require_privilege(&state, &auth_user, MANAGE_USERS).await?;

    let privileges = PrivilegeRepo::list(&state.pool).await?;
    Ok(Json(privileges))
}
