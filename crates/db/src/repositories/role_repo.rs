//! Repository for the `roles` table and the `role_privileges` grant table.

use herbanet_core::types::DbId;
use sqlx::PgPool;

use crate::models::privilege::Privilege;
use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides read and grant operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Resolve a role ID to its name, returning `"unknown"` if the ID is missing.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        Ok(Self::find_by_id(pool, role_id)
            .await?
            .map(|r| r.name)
            .unwrap_or_else(|| "unknown".to_string()))
    }

    /// The privileges granted to a role.
    pub async fn privileges_of(
        pool: &PgPool,
        role_id: DbId,
    ) -> Result<Vec<Privilege>, sqlx::Error> {
        sqlx::query_as::<_, Privilege>(
            "SELECT p.id, p.code, p.description FROM privileges p
             JOIN role_privileges rp ON rp.privilege_id = p.id
             WHERE rp.role_id = $1
             ORDER BY p.code",
        )
        .bind(role_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the role's privilege set (replace-set semantics), in one
    /// transaction.
    pub async fn set_privileges(
        pool: &PgPool,
        role_id: DbId,
        privilege_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM role_privileges WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        for privilege_id in privilege_ids {
            sqlx::query(
                "INSERT INTO role_privileges (role_id, privilege_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(role_id)
            .bind(privilege_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
