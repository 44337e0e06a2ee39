//! HTTP handlers, one module per resource.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod messages;
pub mod payments;
pub mod reservations;
pub mod rooms;
