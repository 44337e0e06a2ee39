//! Privilege-based authorization checks.
//!
//! Privileges are resolved against the database on every check rather than
//! baked into the token, so grant changes take effect immediately. The
//! additive role-plus-direct rule lives in
//! [`herbanet_core::privileges::is_authorized`].

use herbanet_core::error::CoreError;
use herbanet_core::privileges::is_authorized;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Require a single privilege code. Rejects with 403 Forbidden otherwise.
pub async fn require_privilege(state: &AppState, user: &AuthUser, code: &str) -> AppResult<()> {
    let (role_codes, user_codes) =
        herbanet_db::repositories::UserRepo::privilege_sets(&state.pool, user.user_id).await?;

    if is_authorized(&role_codes, &user_codes, code) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Missing privilege: {code}"
        ))))
    }
}

/// Require at least one of the given privilege codes.
pub async fn require_any_privilege(
    state: &AppState,
    user: &AuthUser,
    codes: &[&str],
) -> AppResult<()> {
    let (role_codes, user_codes) =
        herbanet_db::repositories::UserRepo::privilege_sets(&state.pool, user.user_id).await?;

    if codes
        .iter()
        .any(|code| is_authorized(&role_codes, &user_codes, code))
    {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Missing privilege: one of {} required",
            codes.join(", ")
        ))))
    }
}
