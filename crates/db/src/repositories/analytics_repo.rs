//! Occupancy metrics for the manager dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardMetrics;

/// Provides aggregate read queries for analytics.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Room and reservation counts for the dashboard, in one round trip.
    pub async fn dashboard_metrics(pool: &PgPool) -> Result<DashboardMetrics, sqlx::Error> {
        sqlx::query_as::<_, DashboardMetrics>(
            "SELECT
                (SELECT COUNT(*) FROM rooms) AS total_rooms,
                (SELECT COUNT(*) FROM rooms WHERE status IN ('RESERVED', 'OCCUPIED')) AS busy_rooms,
                (SELECT COUNT(*) FROM reservations WHERE status = 'CONFIRMED') AS active_reservations",
        )
        .fetch_one(pool)
        .await
    }
}
