//! Aggregate metrics for the occupancy dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// Counts backing the manager dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardMetrics {
    pub total_rooms: i64,
    /// Rooms currently RESERVED or OCCUPIED.
    pub busy_rooms: i64,
    /// Reservations currently CONFIRMED.
    pub active_reservations: i64,
}

impl DashboardMetrics {
    /// Busy rooms as a percentage of inventory; 0 when there are no rooms.
    pub fn occupancy_pct(&self) -> f64 {
        if self.total_rooms == 0 {
            0.0
        } else {
            self.busy_rooms as f64 * 100.0 / self.total_rooms as f64
        }
    }
}
