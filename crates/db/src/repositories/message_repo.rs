//! Repository for the `customer_messages` table.

use herbanet_core::support::MESSAGE_RESOLVED;
use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, CustomerMessage};

/// Column list for messages joined with their author's username.
const COLUMNS: &str = "m.id, m.user_id, u.username, m.subject, m.body, m.status, \
     m.reply_message, m.replied_at, m.created_at";

const FROM: &str = "FROM customer_messages m JOIN users u ON u.id = m.user_id";

/// Provides CRUD operations for customer messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message with status NEW, returning it fully populated.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMessage,
    ) -> Result<CustomerMessage, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO customer_messages (user_id, subject, body)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.subject)
        .bind(&input.body)
        .fetch_one(pool)
        .await?;

        // Re-read joined so the response carries the author.
        let query = format!("SELECT {COLUMNS} {FROM} WHERE m.id = $1");
        sqlx::query_as::<_, CustomerMessage>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a message by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CustomerMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE m.id = $1");
        sqlx::query_as::<_, CustomerMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all messages, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CustomerMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} ORDER BY m.created_at DESC");
        sqlx::query_as::<_, CustomerMessage>(&query)
            .fetch_all(pool)
            .await
    }

    /// List messages in a given status, newest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<CustomerMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE m.status = $1 ORDER BY m.created_at DESC");
        sqlx::query_as::<_, CustomerMessage>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List one user's messages, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CustomerMessage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} {FROM} WHERE m.user_id = $1 ORDER BY m.created_at DESC");
        sqlx::query_as::<_, CustomerMessage>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record a staff reply: stores the reply text, stamps the reply time,
    /// and resolves the message. Returns `true` if a row was updated.
    pub async fn reply(pool: &PgPool, id: DbId, reply: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE customer_messages
             SET reply_message = $2, status = $3, replied_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(reply)
        .bind(MESSAGE_RESOLVED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
