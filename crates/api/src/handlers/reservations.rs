//! Handlers for the `/reservations` resource: booking, lifecycle
//! transitions, and listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use herbanet_core::booking::{self, ReservationStatus};
use herbanet_core::error::CoreError;
use herbanet_core::privileges::{BOOK_ROOM, CANCEL_RESERVATION, CHECK_IN, CHECK_OUT, VIEW_ANALYTICS};
use herbanet_core::types::DbId;
use herbanet_db::models::reservation::{CreateReservation, Reservation, ReservationResponse};
use herbanet_db::repositories::{BookError, ReservationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::privileges::{require_any_privilege, require_privilege};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /reservations`.
#[derive(Debug, Deserialize, Validate)]
pub struct BookRequest {
    pub room_id: DbId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1))]
    pub guest_count: i32,
    /// Book on behalf of another guest (front-desk use). Defaults to the
    /// caller.
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/reservations
///
/// Book a room. Requires `BOOK_ROOM`; booking on behalf of another guest
/// additionally requires `CHECK_IN` (a front-desk privilege).
///
/// Validation happens before any mutation; the availability re-check, the
/// insert, and the room-status flip are atomic inside
/// [`ReservationRepo::book`].
pub async fn book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<BookRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    require_privilege(&state, &auth_user, BOOK_ROOM).await?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    booking::validate_date_range(input.check_in, input.check_out)?;

    let guest_id = input.user_id.unwrap_or(auth_user.user_id);
    if guest_id != auth_user.user_id {
        require_privilege(&state, &auth_user, CHECK_IN).await?;
    }

    let create_dto = CreateReservation {
        user_id: guest_id,
        room_id: input.room_id,
        check_in: input.check_in,
        check_out: input.check_out,
        guest_count: input.guest_count,
    };

    let reservation = ReservationRepo::book(&state.pool, &create_dto)
        .await
        .map_err(|e| book_error_to_app(e, input.room_id))?;

    tracing::info!(
        reservation_id = reservation.id,
        room_id = reservation.room_id,
        user_id = reservation.user_id,
        "reservation booked"
    );

    let response = load_detail(&state, reservation.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Query string for `GET /reservations`.
#[derive(Debug, Deserialize)]
pub struct ReservationFilter {
    /// Restrict the listing to one guest.
    pub user_id: Option<DbId>,
}

/// GET /api/v1/reservations?user_id=..
///
/// Every reservation, optionally filtered to one guest. Front-desk and
/// analytics use.
pub async fn list_all(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filter): Query<ReservationFilter>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    require_any_privilege(&state, &auth_user, &[CHECK_IN, VIEW_ANALYTICS]).await?;

    let reservations = match filter.user_id {
        Some(user_id) => ReservationRepo::list_for_user(&state.pool, user_id).await?,
        None => ReservationRepo::list_all(&state.pool).await?,
    };
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// GET /api/v1/reservations/mine
///
/// The caller's own reservations.
pub async fn list_mine(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    let reservations = ReservationRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// GET /api/v1/reservations/{id}
///
/// A single reservation: visible to its owner and to front-desk/analytics
/// staff.
pub async fn get_reservation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReservationResponse>> {
    let detail = load_detail(&state, id).await?;

    if detail.user_id != auth_user.user_id {
        require_any_privilege(&state, &auth_user, &[CHECK_IN, VIEW_ANALYTICS]).await?;
    }

    Ok(Json(detail))
}

/// POST /api/v1/reservations/{id}/cancel
///
/// Cancel a reservation. Requires `CANCEL_RESERVATION`; cancelling another
/// guest's reservation additionally requires `CHECK_IN`. Legal from any
/// non-terminal state; cancelling a CANCELLED or CHECKED_OUT reservation
/// is rejected with a conflict. The room returns to AVAILABLE. No
/// compensating payment action occurs.
pub async fn cancel(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReservationResponse>> {
    require_privilege(&state, &auth_user, CANCEL_RESERVATION).await?;

    let reservation = load_reservation(&state, id).await?;
    if reservation.user_id != auth_user.user_id {
        require_privilege(&state, &auth_user, CHECK_IN).await?;
    }

    transition(&state, &reservation, ReservationStatus::Cancelled).await?;
    load_detail(&state, id).await.map(Json)
}

/// POST /api/v1/reservations/{id}/check-in
///
/// Mark the guest as arrived. Requires `CHECK_IN`. Legal only from
/// CONFIRMED; the room becomes OCCUPIED.
pub async fn check_in(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReservationResponse>> {
    require_privilege(&state, &auth_user, CHECK_IN).await?;

    let reservation = load_reservation(&state, id).await?;
    transition(&state, &reservation, ReservationStatus::CheckedIn).await?;
    load_detail(&state, id).await.map(Json)
}

/// POST /api/v1/reservations/{id}/check-out
///
/// Mark the guest as departed. Requires `CHECK_OUT`. Legal only from
/// CHECKED_IN; the room returns to AVAILABLE.
pub async fn check_out(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReservationResponse>> {
    require_privilege(&state, &auth_user, CHECK_OUT).await?;

    let reservation = load_reservation(&state, id).await?;
    transition(&state, &reservation, ReservationStatus::CheckedOut).await?;
    load_detail(&state, id).await.map(Json)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a [`BookError`] onto the HTTP error taxonomy.
fn book_error_to_app(err: BookError, room_id: DbId) -> AppError {
    match err {
        BookError::RoomNotFound => AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }),
        BookError::RoomUnavailable(status) => AppError::Core(CoreError::Conflict(format!(
            "Room is not available (status: {status})"
        ))),
        BookError::DatesUnavailable => AppError::Core(CoreError::Conflict(
            "Room is already reserved for an overlapping date range".into(),
        )),
        BookError::Db(e) => AppError::Database(e),
    }
}

/// Load the bare reservation row or fail with 404.
async fn load_reservation(state: &AppState, id: DbId) -> AppResult<Reservation> {
    ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))
}

/// Load the joined reservation detail or fail with 404.
async fn load_detail(state: &AppState, id: DbId) -> AppResult<ReservationResponse> {
    ReservationRepo::find_detail(&state.pool, id)
        .await?
        .map(ReservationResponse::from)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))
}

/// Validate and apply a lifecycle transition with its lockstep room-status
/// write.
async fn transition(
    state: &AppState,
    reservation: &Reservation,
    to: ReservationStatus,
) -> AppResult<()> {
    let current = ReservationStatus::parse(&reservation.status)?;

    if !current.can_transition_to(to) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot move reservation from {} to {}",
            current.as_str(),
            to.as_str()
        ))));
    }

    // The update is guarded on the observed status; a concurrent writer
    // winning the race leaves nothing applied and surfaces as a conflict.
    let applied = ReservationRepo::transition(
        &state.pool,
        reservation.id,
        reservation.room_id,
        current,
        to,
    )
    .await?;

    if !applied {
        return Err(AppError::Core(CoreError::Conflict(
            "Reservation was modified concurrently; reload and retry".into(),
        )));
    }

    tracing::info!(
        reservation_id = reservation.id,
        room_id = reservation.room_id,
        from = current.as_str(),
        to = to.as_str(),
        "reservation transitioned"
    );

    Ok(())
}
