//! Domain core for the Herbanet reservation system.
//!
//! Pure logic only: the reservation state machine, the date-range overlap
//! predicate, rate resolution and cost math, privilege evaluation, and the
//! shared error taxonomy. No I/O and no database types live here.

pub mod booking;
pub mod error;
pub mod privileges;
pub mod roles;
pub mod settlement;
pub mod support;
pub mod types;
