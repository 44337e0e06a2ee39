//! Authentication and authorization middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`privileges::require_privilege`] -- Checks the caller's effective
//!   privilege set (role grants plus direct grants) against a required code.

pub mod auth;
pub mod privileges;
