//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-row invariants
//! (booking, lifecycle transitions, replace-set privilege grants) run
//! inside a single transaction in their repository method.

pub mod analytics_repo;
pub mod category_repo;
pub mod message_repo;
pub mod payment_repo;
pub mod privilege_repo;
pub mod reservation_repo;
pub mod role_repo;
pub mod room_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use category_repo::CategoryRepo;
pub use message_repo::MessageRepo;
pub use payment_repo::PaymentRepo;
pub use privilege_repo::PrivilegeRepo;
pub use reservation_repo::{BookError, ReservationRepo};
pub use role_repo::RoleRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
