//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000004_seed_reference_data.sql`.

pub const ROLE_CUSTOMER: &str = "CUSTOMER";
pub const ROLE_RECEPTIONIST: &str = "RECEPTIONIST";
pub const ROLE_MANAGER: &str = "MANAGER";
pub const ROLE_ADMIN: &str = "ADMIN";
