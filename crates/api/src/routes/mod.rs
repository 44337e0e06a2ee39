//! Route definitions, one module per resource.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod health;
pub mod messages;
pub mod reservations;
pub mod rooms;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                        signup (public)
/// /auth/login                         login (public)
/// /auth/me                            profile + privileges
///
/// /rooms                              catalog; create (MANAGE_ROOMS)
/// /rooms/available                    availability search
/// /rooms/{id}                         detail; update (MANAGE_ROOMS)
/// /rooms/{id}/quote                   stay-cost quote
/// /rooms/{id}/status                  manual override (MANAGE_ROOMS)
/// /categories                         category list
///
/// /reservations                       book (BOOK_ROOM); list (staff)
/// /reservations/mine                  caller's reservations
/// /reservations/{id}                  detail (owner or staff)
/// /reservations/{id}/cancel           cancel (CANCEL_RESERVATION)
/// /reservations/{id}/check-in         check-in (CHECK_IN)
/// /reservations/{id}/check-out        check-out (CHECK_OUT)
/// /reservations/{id}/payments         capture (BOOK_ROOM); history
///
/// /messages                           submit; desk list (MANAGE_MESSAGES)
/// /messages/mine                      caller's messages
/// /messages/{id}/reply                staff reply (MANAGE_MESSAGES)
///
/// /analytics/dashboard                occupancy metrics (VIEW_ANALYTICS)
///
/// /admin/users                        list, create (MANAGE_USERS)
/// /admin/users/{id}                   update, deactivate
/// /admin/users/{id}/privileges        replace-set grants
/// /admin/roles                        list roles + grants
/// /admin/roles/{id}/privileges        replace-set grants
/// /admin/privileges                   privilege reference data
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(rooms::router())
        .nest("/reservations", reservations::router())
        .nest("/messages", messages::router())
        .nest("/analytics", analytics::router())
        .nest("/admin", admin::router())
}
