//! Privilege codes and effective-permission evaluation.
//!
//! Privileges are immutable reference data seeded by migration; the codes
//! here must match `20260301000004_seed_reference_data.sql`. A caller's effective
//! permission set is the union of their role's grants and any privileges
//! granted to them directly.

pub const BOOK_ROOM: &str = "BOOK_ROOM";
pub const CANCEL_RESERVATION: &str = "CANCEL_RESERVATION";
pub const CHECK_IN: &str = "CHECK_IN";
pub const CHECK_OUT: &str = "CHECK_OUT";
pub const MANAGE_ROOMS: &str = "MANAGE_ROOMS";
pub const VIEW_ANALYTICS: &str = "VIEW_ANALYTICS";
pub const MANAGE_USERS: &str = "MANAGE_USERS";
pub const MANAGE_MESSAGES: &str = "MANAGE_MESSAGES";

/// Check a privilege code against role-level and directly-granted sets.
///
/// Grants are additive: a code held by either set authorizes the caller.
pub fn is_authorized(role_codes: &[String], user_codes: &[String], code: &str) -> bool {
    role_codes.iter().any(|c| c == code) || user_codes.iter().any(|c| c == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn grants_are_additive() {
        let role = codes(&[BOOK_ROOM, CANCEL_RESERVATION]);
        let direct = codes(&[MANAGE_USERS]);

        // In role only.
        assert!(is_authorized(&role, &direct, BOOK_ROOM));
        // Directly granted only.
        assert!(is_authorized(&role, &direct, MANAGE_USERS));
        // In both.
        let both = codes(&[BOOK_ROOM]);
        assert!(is_authorized(&role, &both, BOOK_ROOM));
        // In neither.
        assert!(!is_authorized(&role, &direct, MANAGE_ROOMS));
    }

    #[test]
    fn empty_sets_authorize_nothing() {
        assert!(!is_authorized(&[], &[], BOOK_ROOM));
    }
}
