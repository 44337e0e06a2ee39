//! Room entity model and DTOs.

use herbanet_core::booking;
use herbanet_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A room row from the `rooms` table.
#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: DbId,
    pub room_number: String,
    pub category_id: DbId,
    pub floor: i32,
    pub view_type: Option<String>,
    pub status: String,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub rate_override: Option<f64>,
}

/// A room joined with its category, as read operations return it.
#[derive(Debug, Clone, FromRow)]
pub struct RoomDetail {
    pub id: DbId,
    pub room_number: String,
    pub category_id: DbId,
    pub category_name: String,
    pub base_rate: f64,
    pub floor: i32,
    pub view_type: Option<String>,
    pub status: String,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub rate_override: Option<f64>,
}

impl RoomDetail {
    /// The rate actually billed per night: room override, else category base.
    pub fn nightly_rate(&self) -> f64 {
        booking::effective_rate(self.rate_override, Some(self.base_rate))
    }
}

/// Fully-populated room representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RoomResponse {
    pub id: DbId,
    pub room_number: String,
    pub category_id: DbId,
    pub category_name: String,
    pub floor: i32,
    pub view_type: Option<String>,
    pub status: String,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub nightly_rate: f64,
}

impl From<RoomDetail> for RoomResponse {
    fn from(room: RoomDetail) -> Self {
        let nightly_rate = room.nightly_rate();
        RoomResponse {
            id: room.id,
            room_number: room.room_number,
            category_id: room.category_id,
            category_name: room.category_name,
            floor: room.floor,
            view_type: room.view_type,
            status: room.status,
            photo_url: room.photo_url,
            description: room.description,
            nightly_rate,
        }
    }
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub room_number: String,
    pub category_id: DbId,
    pub floor: i32,
    pub view_type: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub rate_override: Option<f64>,
}

/// DTO for updating an existing room. All fields are optional; status is
/// deliberately absent -- it moves through `RoomRepo::update_status` only.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoom {
    pub category_id: Option<DbId>,
    pub floor: Option<i32>,
    pub view_type: Option<String>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub rate_override: Option<f64>,
}
