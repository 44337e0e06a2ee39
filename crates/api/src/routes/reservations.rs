//! Route definitions for reservations and their payments, mounted at
//! `/reservations`.
//!
//! ```text
//! POST /                   -> book (BOOK_ROOM)
//! GET  /?user_id=          -> list_all (CHECK_IN or VIEW_ANALYTICS)
//! GET  /mine               -> list_mine
//! GET  /{id}               -> get_reservation (owner or staff)
//! POST /{id}/cancel        -> cancel (CANCEL_RESERVATION)
//! POST /{id}/check-in      -> check_in (CHECK_IN)
//! POST /{id}/check-out     -> check_out (CHECK_OUT)
//! POST /{id}/payments      -> payments::capture (BOOK_ROOM)
//! GET  /{id}/payments      -> payments::list (owner or staff)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{payments, reservations};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservations::book).get(reservations::list_all))
        .route("/mine", get(reservations::list_mine))
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/cancel", post(reservations::cancel))
        .route("/{id}/check-in", post(reservations::check_in))
        .route("/{id}/check-out", post(reservations::check_out))
        .route("/{id}/payments", post(payments::capture).get(payments::list))
}
