//! Repository for the `rooms` table, including the availability search.

use chrono::NaiveDate;
use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::{CreateRoom, Room, RoomDetail, UpdateRoom};

/// Column list for the bare `rooms` row.
const COLUMNS: &str =
    "id, room_number, category_id, floor, view_type, status, photo_url, description, rate_override";

/// Column list for rooms joined with their category.
const DETAIL_COLUMNS: &str = "r.id, r.room_number, r.category_id, c.name AS category_name, \
     c.base_rate, r.floor, r.view_type, r.status, r.photo_url, r.description, r.rate_override";

/// Provides CRUD and availability operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    ///
    /// Room-number uniqueness is enforced by `uq_rooms_room_number`.
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (room_number, category_id, floor, view_type, photo_url, description, rate_override)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.room_number)
            .bind(input.category_id)
            .bind(input.floor)
            .bind(&input.view_type)
            .bind(&input.photo_url)
            .bind(&input.description)
            .bind(input.rate_override)
            .fetch_one(pool)
            .await
    }

    /// Find a room by ID, joined with its category.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoomDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM rooms r
             JOIN room_categories c ON c.id = r.category_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, RoomDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a room by its public room number.
    pub async fn find_by_number(
        pool: &PgPool,
        room_number: &str,
    ) -> Result<Option<RoomDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM rooms r
             JOIN room_categories c ON c.id = r.category_id
             WHERE r.room_number = $1"
        );
        sqlx::query_as::<_, RoomDetail>(&query)
            .bind(room_number)
            .fetch_optional(pool)
            .await
    }

    /// List all rooms joined with their category, ordered by room number.
    pub async fn list(pool: &PgPool) -> Result<Vec<RoomDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM rooms r
             JOIN room_categories c ON c.id = r.category_id
             ORDER BY r.room_number"
        );
        sqlx::query_as::<_, RoomDetail>(&query).fetch_all(pool).await
    }

    /// Rooms bookable for `[check_in, check_out]`: currently AVAILABLE and
    /// free of any overlapping non-cancelled reservation.
    ///
    /// The closed-interval comparison must stay in sync with
    /// `herbanet_core::booking::ranges_overlap`.
    pub async fn find_available(
        pool: &PgPool,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<RoomDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM rooms r
             JOIN room_categories c ON c.id = r.category_id
             WHERE r.status = 'AVAILABLE'
               AND r.id NOT IN (
                   SELECT res.room_id FROM reservations res
                   WHERE res.status <> 'CANCELLED'
                     AND res.check_in <= $2
                     AND res.check_out >= $1
               )
             ORDER BY r.room_number"
        );
        sqlx::query_as::<_, RoomDetail>(&query)
            .bind(check_in)
            .bind(check_out)
            .fetch_all(pool)
            .await
    }

    /// Update a room's master data. Only non-`None` fields are applied;
    /// status is excluded (see `update_status`).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                category_id = COALESCE($2, category_id),
                floor = COALESCE($3, floor),
                view_type = COALESCE($4, view_type),
                photo_url = COALESCE($5, photo_url),
                description = COALESCE($6, description),
                rate_override = COALESCE($7, rate_override)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(input.floor)
            .bind(&input.view_type)
            .bind(&input.photo_url)
            .bind(&input.description)
            .bind(input.rate_override)
            .fetch_optional(pool)
            .await
    }

    /// Set a room's status. Returns `true` if a row was updated.
    ///
    /// Callers validate the status value; the booking repository drives
    /// lifecycle statuses through its own transactions.
    pub async fn update_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
