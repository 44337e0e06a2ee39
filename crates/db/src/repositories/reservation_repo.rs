//! Repository for the `reservations` table.
//!
//! Booking is the one contended path in the system: the availability
//! re-check, the reservation insert, and the room-status flip must be
//! atomic, or two callers racing on the same room and dates both succeed.
//! [`ReservationRepo::book`] serializes contenders with a `FOR UPDATE`
//! row lock on the room.

use chrono::NaiveDate;
use herbanet_core::booking::{ReservationStatus, RoomStatus};
use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::reservation::{CreateReservation, Reservation, ReservationDetail};
use crate::models::room::Room;

/// Column list for the bare `reservations` row.
const COLUMNS: &str = "id, user_id, room_id, check_in, check_out, guest_count, status, created_at";

/// Column list for reservations joined with guest and room.
const DETAIL_COLUMNS: &str = "res.id, res.user_id, u.username, u.first_name, u.last_name, \
     res.room_id, r.room_number, c.name AS category_name, c.base_rate, r.rate_override, \
     res.check_in, res.check_out, res.guest_count, res.status, res.created_at";

const DETAIL_FROM: &str = "FROM reservations res
     JOIN users u ON u.id = res.user_id
     JOIN rooms r ON r.id = res.room_id
     JOIN room_categories c ON c.id = r.category_id";

/// Why a booking attempt was refused.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Room is not available (status: {0})")]
    RoomUnavailable(String),

    #[error("Room is already reserved for an overlapping date range")]
    DatesUnavailable,

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides booking and lifecycle operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Book a room for a date range, atomically.
    ///
    /// One transaction covers the whole sequence:
    /// 1. Lock the room row (`FOR UPDATE`) -- concurrent bookings on the
    ///    same room queue up here.
    /// 2. Verify the room's status is AVAILABLE.
    /// 3. Run the closed-interval overlap check against every
    ///    non-cancelled reservation of the room. The cached status field
    ///    cannot stand in for this: it says nothing about future-dated
    ///    reservations.
    /// 4. Insert the CONFIRMED reservation.
    /// 5. Flip the room to RESERVED.
    ///
    /// A contender that loses the lock race observes the winner's
    /// committed rows in step 2/3 and fails; nothing is partially applied.
    pub async fn book(pool: &PgPool, input: &CreateReservation) -> Result<Reservation, BookError> {
        let mut tx = pool.begin().await?;

        let room = sqlx::query_as::<_, Room>(
            "SELECT id, room_number, category_id, floor, view_type, status, photo_url,
             description, rate_override FROM rooms WHERE id = $1 FOR UPDATE",
        )
            .bind(input.room_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(BookError::RoomNotFound)?;

        if room.status != RoomStatus::Available.as_str() {
            tracing::debug!(room_id = input.room_id, status = %room.status, "booking refused: room not available");
            return Err(BookError::RoomUnavailable(room.status));
        }

        let conflict = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM reservations
             WHERE room_id = $1
               AND status <> 'CANCELLED'
               AND check_in <= $3
               AND check_out >= $2
             LIMIT 1",
        )
        .bind(input.room_id)
        .bind(input.check_in)
        .bind(input.check_out)
        .fetch_optional(&mut *tx)
        .await?;

        if conflict.is_some() {
            tracing::debug!(room_id = input.room_id, "booking refused: overlapping reservation");
            return Err(BookError::DatesUnavailable);
        }

        let insert_query = format!(
            "INSERT INTO reservations (user_id, room_id, check_in, check_out, guest_count, status)
             VALUES ($1, $2, $3, $4, $5, 'CONFIRMED')
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&insert_query)
            .bind(input.user_id)
            .bind(input.room_id)
            .bind(input.check_in)
            .bind(input.check_out)
            .bind(input.guest_count)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(input.room_id)
            .bind(RoomStatus::Reserved.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    /// Find a reservation by ID (bare row).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a reservation by ID, joined with guest and room.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReservationDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE res.id = $1");
        sqlx::query_as::<_, ReservationDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every reservation, newest stay first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ReservationDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} ORDER BY res.check_in DESC");
        sqlx::query_as::<_, ReservationDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one guest's reservations, newest stay first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReservationDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE res.user_id = $1
             ORDER BY res.check_in DESC"
        );
        sqlx::query_as::<_, ReservationDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Reservations of a room overlapping a date range, non-cancelled only.
    pub async fn find_overlapping(
        pool: &PgPool,
        room_id: DbId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE room_id = $1
               AND status <> 'CANCELLED'
               AND check_in <= $3
               AND check_out >= $2
             ORDER BY check_in"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(room_id)
            .bind(check_in)
            .bind(check_out)
            .fetch_all(pool)
            .await
    }

    /// Apply a lifecycle transition and the lockstep room-status write in
    /// one transaction.
    ///
    /// The reservation update is guarded on the status the caller
    /// observed (`from`); if another writer got there first the guard
    /// misses, nothing is applied, and `false` is returned so the caller
    /// can report a conflict.
    pub async fn transition(
        pool: &PgPool,
        reservation_id: DbId,
        room_id: DbId,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE reservations SET status = $3 WHERE id = $1 AND status = $2",
        )
        .bind(reservation_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE rooms SET status = $2 WHERE id = $1")
            .bind(room_id)
            .bind(to.room_status_on_entry().as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
