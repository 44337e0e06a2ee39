//! Privilege entity model.

use herbanet_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A privilege row from the `privileges` table. Immutable reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Privilege {
    pub id: DbId,
    pub code: String,
    pub description: String,
}
