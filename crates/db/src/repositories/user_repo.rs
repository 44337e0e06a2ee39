//! Repository for the `users` table and the `user_privileges` grant table.

use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, email, role_id, active, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Username uniqueness is enforced by `uq_users_username`; a collision
    /// surfaces as a database error the caller classifies.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, first_name, last_name, email, role_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by creation time, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user's profile fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                role_id = COALESCE($5, role_id),
                active = COALESCE($6, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.role_id)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a user (`active = false`). Users are never deleted.
    /// Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET active = FALSE WHERE id = $1 AND active")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the user's directly-granted privilege set.
    ///
    /// Replace-set semantics: the previous grants are removed and exactly
    /// the given privilege IDs are written, in one transaction.
    pub async fn set_privileges(
        pool: &PgPool,
        user_id: DbId,
        privilege_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_privileges WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for privilege_id in privilege_ids {
            sqlx::query(
                "INSERT INTO user_privileges (user_id, privilege_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(privilege_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// The user's privilege codes as two sets: role grants and direct
    /// grants. The additive union rule is applied by the caller.
    pub async fn privilege_sets(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<(Vec<String>, Vec<String>), sqlx::Error> {
        let role_codes = sqlx::query_scalar::<_, String>(
            "SELECT p.code FROM privileges p
             JOIN role_privileges rp ON rp.privilege_id = p.id
             JOIN users u ON u.role_id = rp.role_id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let user_codes = sqlx::query_scalar::<_, String>(
            "SELECT p.code FROM privileges p
             JOIN user_privileges up ON up.privilege_id = p.id
             WHERE up.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok((role_codes, user_codes))
    }

    /// The user's effective privilege codes: role grants plus direct grants.
    pub async fn effective_privilege_codes(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT p.code FROM privileges p
             JOIN role_privileges rp ON rp.privilege_id = p.id
             JOIN users u ON u.role_id = rp.role_id
             WHERE u.id = $1
             UNION
             SELECT p.code FROM privileges p
             JOIN user_privileges up ON up.privilege_id = p.id
             WHERE up.user_id = $1
             ORDER BY 1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
