//! Demo account seeding.
//!
//! Reference data (roles, privileges, categories, rooms) is seeded by
//! migration; user accounts cannot be, because password hashes are salted.
//! When `SEED_DEMO_USERS` is set, one account per role is created at boot,
//! idempotently. The admin account additionally receives a direct
//! `MANAGE_USERS` grant, exercising the user-level grant path.

use herbanet_core::privileges::MANAGE_USERS;
use herbanet_core::roles::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_MANAGER, ROLE_RECEPTIONIST};
use herbanet_db::models::user::CreateUser;
use herbanet_db::repositories::{PrivilegeRepo, RoleRepo, UserRepo};
use herbanet_db::DbPool;

use crate::auth::password::hash_password;

/// Demo password shared by all seeded accounts. Development only.
const DEMO_PASSWORD: &str = "password";

struct DemoAccount {
    username: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    role: &'static str,
}

const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "customer",
        first_name: "John",
        last_name: "Doe",
        email: "customer@hotel.com",
        role: ROLE_CUSTOMER,
    },
    DemoAccount {
        username: "receptionist",
        first_name: "Jane",
        last_name: "Smith",
        email: "receptionist@hotel.com",
        role: ROLE_RECEPTIONIST,
    },
    DemoAccount {
        username: "manager",
        first_name: "Bob",
        last_name: "Johnson",
        email: "manager@hotel.com",
        role: ROLE_MANAGER,
    },
    DemoAccount {
        username: "admin",
        first_name: "Admin",
        last_name: "User",
        email: "admin@hotel.com",
        role: ROLE_ADMIN,
    },
];

/// Create the demo accounts that don't exist yet. Safe to run on every
/// boot.
pub async fn seed_demo_users(pool: &DbPool) -> Result<(), sqlx::Error> {
    for account in DEMO_ACCOUNTS {
        if UserRepo::find_by_username(pool, account.username)
            .await?
            .is_some()
        {
            continue;
        }

        let role = match RoleRepo::find_by_name(pool, account.role).await? {
            Some(role) => role,
            None => {
                tracing::warn!(role = account.role, "demo seed skipped: role missing");
                continue;
            }
        };

        let password_hash =
            hash_password(DEMO_PASSWORD).expect("demo password hashing must succeed");

        let user = UserRepo::create(
            pool,
            &CreateUser {
                username: account.username.to_string(),
                password_hash,
                first_name: Some(account.first_name.to_string()),
                last_name: Some(account.last_name.to_string()),
                email: account.email.to_string(),
                role_id: role.id,
            },
        )
        .await?;

        // The admin demo account carries a direct grant on top of its role.
        if account.role == ROLE_ADMIN {
            let ids =
                PrivilegeRepo::ids_for_codes(pool, &[MANAGE_USERS.to_string()]).await?;
            UserRepo::set_privileges(pool, user.id, &ids).await?;
        }

        tracing::info!(username = account.username, role = account.role, "demo account created");
    }

    Ok(())
}
