//! Reservation entity model and DTOs.

use chrono::NaiveDate;
use herbanet_core::booking;
use herbanet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reservation row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub user_id: DbId,
    pub room_id: DbId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub status: String,
    pub created_at: Timestamp,
}

/// A reservation joined with its guest and room, as read operations
/// return it.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub room_id: DbId,
    pub room_number: String,
    pub category_name: String,
    pub base_rate: f64,
    pub rate_override: Option<f64>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub status: String,
    pub created_at: Timestamp,
}

impl ReservationDetail {
    pub fn nightly_rate(&self) -> f64 {
        booking::effective_rate(self.rate_override, Some(self.base_rate))
    }

    pub fn nights(&self) -> i64 {
        booking::nights(self.check_in, self.check_out)
    }

    pub fn total_cost(&self) -> f64 {
        booking::stay_cost(self.nights(), self.nightly_rate())
    }
}

/// Fully-populated reservation representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub guest_name: String,
    pub room_id: DbId,
    pub room_number: String,
    pub category_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub status: String,
    pub nights: i64,
    pub nightly_rate: f64,
    pub total_cost: f64,
    pub created_at: Timestamp,
}

impl From<ReservationDetail> for ReservationResponse {
    fn from(r: ReservationDetail) -> Self {
        let guest_name = match (&r.first_name, &r.last_name) {
            (Some(f), Some(l)) => format!("{f} {l}"),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => String::new(),
        };
        let nights = r.nights();
        let nightly_rate = r.nightly_rate();
        let total_cost = r.total_cost();
        ReservationResponse {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            guest_name,
            room_id: r.room_id,
            room_number: r.room_number,
            category_name: r.category_name,
            check_in: r.check_in,
            check_out: r.check_out,
            guest_count: r.guest_count,
            status: r.status,
            nights,
            nightly_rate,
            total_cost,
            created_at: r.created_at,
        }
    }
}

/// DTO for creating a new reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservation {
    pub user_id: DbId,
    pub room_id: DbId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
}
