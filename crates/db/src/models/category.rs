//! Room category entity model.

use herbanet_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A room category row from the `room_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Base nightly rate inherited by rooms without an override.
    pub base_rate: f64,
}
