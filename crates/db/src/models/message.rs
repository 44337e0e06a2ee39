//! Customer message entity model and DTOs.

use herbanet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer message row joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerMessage {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub reply_message: Option<String>,
    pub replied_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for submitting a new message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub user_id: DbId,
    pub subject: String,
    pub body: String,
}
