//! Payment capture rules and transaction-reference generation.
//!
//! Payments are append-only records; the only status this system produces
//! is CAPTURED. The reference format is a fixed prefix plus a six-digit
//! random suffix. It is not financial-grade unique, and the amount check
//! against the computed stay cost is the server-side guard that the caller
//! is paying what the stay actually costs.

use rand::Rng;

use crate::error::CoreError;

/// The only payment status this system writes.
pub const PAYMENT_CAPTURED: &str = "CAPTURED";

/// Prefix for generated transaction references.
pub const TXN_REF_PREFIX: &str = "HRB-";

/// Tolerance for comparing a submitted amount against a computed cost.
const AMOUNT_EPSILON: f64 = 0.005;

/// Generate a transaction reference: `HRB-` followed by six random digits.
pub fn generate_transaction_ref() -> String {
    let suffix: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("{TXN_REF_PREFIX}{suffix}")
}

/// Validate a payment amount against the reservation's computed stay cost.
///
/// The amount must be positive and equal to the expected cost (to within
/// rounding tolerance); the server never trusts a caller-supplied total.
pub fn validate_amount(amount: f64, expected_cost: f64) -> Result<(), CoreError> {
    if amount <= 0.0 {
        return Err(CoreError::Validation(
            "Payment amount must be positive".to_string(),
        ));
    }
    if (amount - expected_cost).abs() > AMOUNT_EPSILON {
        return Err(CoreError::Validation(format!(
            "Payment amount {amount:.2} does not match stay cost {expected_cost:.2}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_format() {
        for _ in 0..50 {
            let txn_ref = generate_transaction_ref();
            assert!(txn_ref.starts_with(TXN_REF_PREFIX));
            let suffix = &txn_ref[TXN_REF_PREFIX.len()..];
            assert_eq!(suffix.len(), 6);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(validate_amount(0.0, 240.0).is_err());
        assert!(validate_amount(-5.0, 240.0).is_err());
    }

    #[test]
    fn amount_must_match_cost() {
        assert!(validate_amount(240.0, 240.0).is_ok());
        // Within rounding tolerance.
        assert!(validate_amount(240.001, 240.0).is_ok());
        // Underpayment and overpayment both rejected.
        assert!(validate_amount(200.0, 240.0).is_err());
        assert!(validate_amount(240.02, 240.0).is_err());
    }
}
