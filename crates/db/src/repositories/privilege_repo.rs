//! Repository for the `privileges` table (immutable reference data).

use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::privilege::Privilege;

/// Provides read operations for privileges.
pub struct PrivilegeRepo;

impl PrivilegeRepo {
    /// List all privileges ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Privilege>, sqlx::Error> {
        sqlx::query_as::<_, Privilege>(
            "SELECT id, code, description FROM privileges ORDER BY code",
        )
        .fetch_all(pool)
        .await
    }

    /// Resolve privilege codes to IDs. Unknown codes are silently dropped,
    /// matching the replace-set grant contract.
    pub async fn ids_for_codes(
        pool: &PgPool,
        codes: &[String],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM privileges WHERE code = ANY($1)")
            .bind(codes)
            .fetch_all(pool)
            .await
    }
}
