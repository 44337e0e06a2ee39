//! Customer message status taxonomy.
//!
//! Messages move NEW -> RESOLVED when staff reply; IN_PROGRESS exists in
//! the taxonomy for desk triage but no operation currently writes it.

use crate::error::CoreError;

pub const MESSAGE_NEW: &str = "NEW";
pub const MESSAGE_IN_PROGRESS: &str = "IN_PROGRESS";
pub const MESSAGE_RESOLVED: &str = "RESOLVED";

/// Validate a message status filter supplied by a caller.
pub fn validate_message_status(value: &str) -> Result<(), CoreError> {
    match value {
        MESSAGE_NEW | MESSAGE_IN_PROGRESS | MESSAGE_RESOLVED => Ok(()),
        other => Err(CoreError::Validation(format!(
            "Unknown message status: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_pass() {
        assert!(validate_message_status(MESSAGE_NEW).is_ok());
        assert!(validate_message_status(MESSAGE_IN_PROGRESS).is_ok());
        assert!(validate_message_status(MESSAGE_RESOLVED).is_ok());
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(validate_message_status("ARCHIVED").is_err());
    }
}
