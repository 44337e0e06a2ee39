//! Handlers for the `/analytics` resource (occupancy dashboard).

use axum::extract::State;
use axum::Json;
use herbanet_core::privileges::VIEW_ANALYTICS;
use herbanet_db::repositories::AnalyticsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::privileges::require_privilege;
use crate::state::AppState;

/// Response body for `GET /analytics/dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_rooms: i64,
    pub busy_rooms: i64,
    pub active_reservations: i64,
    /// Busy rooms as a percentage of inventory.
    pub occupancy_pct: f64,
}

/// GET /api/v1/analytics/dashboard
///
/// Occupancy metrics for managers. Requires `VIEW_ANALYTICS`.
pub async fn dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DashboardResponse>> {
    require_privilege(&state, &auth_user, VIEW_ANALYTICS).await?;

    let metrics = AnalyticsRepo::dashboard_metrics(&state.pool).await?;

    Ok(Json(DashboardResponse {
        total_rooms: metrics.total_rooms,
        busy_rooms: metrics.busy_rooms,
        active_reservations: metrics.active_reservations,
        occupancy_pct: metrics.occupancy_pct(),
    }))
}
