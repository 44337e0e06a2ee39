//! Payment entity model and DTOs.

use herbanet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A payment row from the `payments` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub reservation_id: DbId,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub transaction_ref: String,
    pub paid_at: Timestamp,
}

/// DTO for capturing a payment. The transaction reference and status are
/// generated server-side before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub reservation_id: DbId,
    pub amount: f64,
    pub method: String,
    pub transaction_ref: String,
}
