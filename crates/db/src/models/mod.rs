//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Joined detail structs for read operations, fully populated up front
//!   so callers never trigger follow-up loads

pub mod category;
pub mod dashboard;
pub mod message;
pub mod payment;
pub mod privilege;
pub mod reservation;
pub mod role;
pub mod room;
pub mod user;
