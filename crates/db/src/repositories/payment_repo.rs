//! Repository for the `payments` table. Append-only.

use herbanet_core::settlement::PAYMENT_CAPTURED;
use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, reservation_id, amount, method, status, transaction_ref, paid_at";

/// Provides capture and listing operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a captured payment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (reservation_id, amount, method, status, transaction_ref)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.reservation_id)
            .bind(input.amount)
            .bind(&input.method)
            .bind(PAYMENT_CAPTURED)
            .bind(&input.transaction_ref)
            .fetch_one(pool)
            .await
    }

    /// A reservation's payment history, oldest first.
    pub async fn list_for_reservation(
        pool: &PgPool,
        reservation_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE reservation_id = $1 ORDER BY paid_at ASC, id ASC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(reservation_id)
            .fetch_all(pool)
            .await
    }
}
