//! Route definitions for customer messages, mounted at `/messages`.
//!
//! ```text
//! POST /             -> submit (any authenticated user)
//! GET  /             -> list (MANAGE_MESSAGES)
//! GET  /mine         -> list_mine
//! POST /{id}/reply   -> reply (MANAGE_MESSAGES)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::submit).get(messages::list))
        .route("/mine", get(messages::list_mine))
        .route("/{id}/reply", post(messages::reply))
}
