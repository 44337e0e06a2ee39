//! Role entity model.

use herbanet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::privilege::Privilege;

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A role with its granted privileges resolved, for admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct RoleWithPrivileges {
    pub id: DbId,
    pub name: String,
    pub privileges: Vec<Privilege>,
}
