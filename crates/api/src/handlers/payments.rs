//! Handlers for payment capture and history, nested under
//! `/reservations/{id}/payments`.
//!
//! Payment capture is simulated: no gateway is involved, the record is the
//! settlement. The server recomputes the stay cost and refuses amounts
//! that do not match it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use herbanet_core::error::CoreError;
use herbanet_core::privileges::{BOOK_ROOM, CHECK_IN};
use herbanet_core::settlement;
use herbanet_core::types::DbId;
use herbanet_db::models::payment::{CreatePayment, Payment};
use herbanet_db::models::reservation::ReservationDetail;
use herbanet_db::repositories::{PaymentRepo, ReservationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::privileges::require_privilege;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /reservations/{id}/payments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CapturePaymentRequest {
    pub amount: f64,
    #[validate(length(min = 1, max = 40))]
    pub method: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/reservations/{id}/payments
///
/// Capture a payment against a reservation. Requires `BOOK_ROOM`; paying
/// for another guest's reservation additionally requires `CHECK_IN`.
///
/// The amount must equal the reservation's computed stay cost -- the
/// caller-supplied figure is never trusted.
pub async fn capture(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CapturePaymentRequest>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    require_privilege(&state, &auth_user, BOOK_ROOM).await?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let reservation = load_reservation(&state, id).await?;
    if reservation.user_id != auth_user.user_id {
        require_privilege(&state, &auth_user, CHECK_IN).await?;
    }

    let nightly_rate = reservation.nightly_rate();
    if nightly_rate <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Room {} has no nightly rate configured",
            reservation.room_number
        ))));
    }

    settlement::validate_amount(input.amount, reservation.total_cost())?;

    let create_dto = CreatePayment {
        reservation_id: reservation.id,
        amount: input.amount,
        method: input.method,
        transaction_ref: settlement::generate_transaction_ref(),
    };

    let payment = PaymentRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        payment_id = payment.id,
        reservation_id = payment.reservation_id,
        transaction_ref = %payment.transaction_ref,
        "payment captured"
    );

    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/reservations/{id}/payments
///
/// A reservation's payment history, oldest first. Visible to the owner and
/// to front-desk staff.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Payment>>> {
    let reservation = load_reservation(&state, id).await?;
    if reservation.user_id != auth_user.user_id {
        require_privilege(&state, &auth_user, CHECK_IN).await?;
    }

    let payments = PaymentRepo::list_for_reservation(&state.pool, reservation.id).await?;
    Ok(Json(payments))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_reservation(state: &AppState, id: DbId) -> AppResult<ReservationDetail> {
    ReservationRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id,
        }))
}
