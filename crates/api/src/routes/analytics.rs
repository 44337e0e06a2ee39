//! Route definitions for analytics, mounted at `/analytics`.
//!
//! ```text
//! GET /dashboard -> dashboard (VIEW_ANALYTICS)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(analytics::dashboard))
}
