//! Route definitions for the room catalog and categories.
//!
//! ```text
//! GET  /rooms               -> list_rooms
//! POST /rooms               -> create_room (MANAGE_ROOMS)
//! GET  /rooms/available     -> search_available
//! GET  /rooms/{id}          -> get_room
//! PUT  /rooms/{id}          -> update_room (MANAGE_ROOMS)
//! GET  /rooms/{id}/quote    -> quote
//! PUT  /rooms/{id}/status   -> set_status (MANAGE_ROOMS)
//! GET  /categories          -> list_categories
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route("/rooms/available", get(rooms::search_available))
        .route("/rooms/{id}", get(rooms::get_room).put(rooms::update_room))
        .route("/rooms/{id}/quote", get(rooms::quote))
        .route("/rooms/{id}/status", put(rooms::set_status))
        .route("/categories", get(rooms::list_categories))
}
