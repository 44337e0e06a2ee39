//! Repository for the `room_categories` table.

use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::RoomCategory;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, base_rate";

/// Provides read operations for room categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by base rate ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<RoomCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM room_categories ORDER BY base_rate ASC");
        sqlx::query_as::<_, RoomCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoomCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM room_categories WHERE id = $1");
        sqlx::query_as::<_, RoomCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
