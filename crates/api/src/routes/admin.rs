//! Route definitions for user/role administration, mounted at `/admin`.
//!
//! ```text
//! GET    /users                    -> list_users
//! POST   /users                    -> create_user
//! PUT    /users/{id}               -> update_user
//! DELETE /users/{id}               -> deactivate_user
//! PUT    /users/{id}/privileges    -> assign_user_privileges
//! GET    /roles                    -> list_roles
//! PUT    /roles/{id}/privileges    -> assign_role_privileges
//! GET    /privileges               -> list_privileges
//! ```
//!
//! Every handler checks `MANAGE_USERS` itself.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::deactivate_user),
        )
        .route("/users/{id}/privileges", put(admin::assign_user_privileges))
        .route("/roles", get(admin::list_roles))
        .route("/roles/{id}/privileges", put(admin::assign_role_privileges))
        .route("/privileges", get(admin::list_privileges))
}
