//! Reservation lifecycle rules, the availability overlap predicate, and
//! stay-cost math.
//!
//! Statuses are persisted as upper-case text; the enums here are the single
//! source of truth for legal values and transitions. The database layer and
//! the HTTP layer both parse through [`RoomStatus::parse`] and
//! [`ReservationStatus::parse`] so an unknown status never travels further
//! than the boundary it arrived at.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Room inventory status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Reserved,
    Occupied,
    Maintenance,
    Cleaning,
}

impl RoomStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Reserved => "RESERVED",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
            RoomStatus::Cleaning => "CLEANING",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "AVAILABLE" => Ok(RoomStatus::Available),
            "RESERVED" => Ok(RoomStatus::Reserved),
            "OCCUPIED" => Ok(RoomStatus::Occupied),
            "MAINTENANCE" => Ok(RoomStatus::Maintenance),
            "CLEANING" => Ok(RoomStatus::Cleaning),
            other => Err(CoreError::Validation(format!(
                "Unknown room status: {other}"
            ))),
        }
    }

    /// Whether staff may set this status by hand.
    ///
    /// RESERVED and OCCUPIED are written exclusively by the reservation
    /// lifecycle; manual overrides cover housekeeping states and returning
    /// a room to service.
    pub fn is_manual_override(self) -> bool {
        matches!(
            self,
            RoomStatus::Available | RoomStatus::Maintenance | RoomStatus::Cleaning
        )
    }
}

/// Reservation lifecycle status.
///
/// ```text
///             book()                 check_in()        check_out()
/// (none) ---------------> CONFIRMED ----------> CHECKED_IN ----------> CHECKED_OUT
///                               \                   /
///                                \    cancel()     /
///                                 v               v
///                                    CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::CheckedIn => "CHECKED_IN",
            ReservationStatus::CheckedOut => "CHECKED_OUT",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CHECKED_IN" => Ok(ReservationStatus::CheckedIn),
            "CHECKED_OUT" => Ok(ReservationStatus::CheckedOut),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown reservation status: {other}"
            ))),
        }
    }

    /// CANCELLED and CHECKED_OUT admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::CheckedOut
        )
    }

    /// Whether `self -> next` is a legal lifecycle transition.
    ///
    /// Cancel is permitted from any non-terminal state (CONFIRMED or
    /// CHECKED_IN); cancelling an already-terminal reservation is rejected.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        match (self, next) {
            (ReservationStatus::Confirmed, ReservationStatus::CheckedIn) => true,
            (ReservationStatus::CheckedIn, ReservationStatus::CheckedOut) => true,
            (from, ReservationStatus::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// The room status written in lockstep when a reservation enters `self`.
    pub fn room_status_on_entry(self) -> RoomStatus {
        match self {
            ReservationStatus::Confirmed => RoomStatus::Reserved,
            ReservationStatus::CheckedIn => RoomStatus::Occupied,
            ReservationStatus::CheckedOut => RoomStatus::Available,
            ReservationStatus::Cancelled => RoomStatus::Available,
        }
    }
}

/// Closed-interval overlap test between an existing reservation and a
/// requested range.
///
/// Two ranges conflict when `existing.check_in <= requested.check_out AND
/// existing.check_out >= requested.check_in`. Back-to-back stays sharing a
/// boundary date therefore conflict (no same-day turnover). The SQL
/// availability filter in the db crate encodes the same comparison.
pub fn ranges_overlap(
    existing_in: NaiveDate,
    existing_out: NaiveDate,
    requested_in: NaiveDate,
    requested_out: NaiveDate,
) -> bool {
    existing_in <= requested_out && existing_out >= requested_in
}

/// Validate a requested stay range: check-out must be strictly after
/// check-in.
pub fn validate_date_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), CoreError> {
    if check_out <= check_in {
        return Err(CoreError::Validation(
            "Check-out date must be after check-in".to_string(),
        ));
    }
    Ok(())
}

/// Number of nights in `[check_in, check_out)`, in whole days.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Effective nightly rate: the room's own override wins, then the category
/// base rate. A missing rate resolves to 0, which callers must treat as a
/// data-quality error rather than bill.
pub fn effective_rate(room_override: Option<f64>, category_base: Option<f64>) -> f64 {
    room_override.or(category_base).unwrap_or(0.0)
}

/// Total stay cost: `nights × nightly_rate`.
pub fn stay_cost(nights: i64, nightly_rate: f64) -> f64 {
    nights as f64 * nightly_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn status_round_trips() {
        for s in [
            RoomStatus::Available,
            RoomStatus::Reserved,
            RoomStatus::Occupied,
            RoomStatus::Maintenance,
            RoomStatus::Cleaning,
        ] {
            assert_eq!(RoomStatus::parse(s.as_str()).unwrap(), s);
        }
        for s in [
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::parse(s.as_str()).unwrap(), s);
        }
        assert!(RoomStatus::parse("BUSY").is_err());
        assert!(ReservationStatus::parse("PENDING").is_err());
    }

    #[test]
    fn manual_overrides_exclude_lifecycle_states() {
        assert!(RoomStatus::Available.is_manual_override());
        assert!(RoomStatus::Maintenance.is_manual_override());
        assert!(RoomStatus::Cleaning.is_manual_override());
        assert!(!RoomStatus::Reserved.is_manual_override());
        assert!(!RoomStatus::Occupied.is_manual_override());
    }

    #[test]
    fn lifecycle_transitions() {
        use ReservationStatus::*;

        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(CheckedIn.can_transition_to(Cancelled));

        // Terminal states admit nothing, including re-cancel.
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(!CheckedOut.can_transition_to(Cancelled));
        assert!(!CheckedOut.can_transition_to(CheckedIn));

        // No skipping check-in.
        assert!(!Confirmed.can_transition_to(CheckedOut));
    }

    #[test]
    fn room_status_lockstep() {
        use ReservationStatus::*;
        assert_eq!(Confirmed.room_status_on_entry(), RoomStatus::Reserved);
        assert_eq!(CheckedIn.room_status_on_entry(), RoomStatus::Occupied);
        assert_eq!(CheckedOut.room_status_on_entry(), RoomStatus::Available);
        assert_eq!(Cancelled.room_status_on_entry(), RoomStatus::Available);
    }

    #[test]
    fn overlap_is_closed_interval() {
        // Plain overlap on an interior date.
        assert!(ranges_overlap(
            d("2024-06-01"),
            d("2024-06-03"),
            d("2024-06-02"),
            d("2024-06-04"),
        ));
        // Sharing a boundary date conflicts: no same-day turnover.
        assert!(ranges_overlap(
            d("2024-06-01"),
            d("2024-06-03"),
            d("2024-06-03"),
            d("2024-06-05"),
        ));
        assert!(ranges_overlap(
            d("2024-06-03"),
            d("2024-06-05"),
            d("2024-06-01"),
            d("2024-06-03"),
        ));
        // Fully contained.
        assert!(ranges_overlap(
            d("2024-06-01"),
            d("2024-06-10"),
            d("2024-06-04"),
            d("2024-06-05"),
        ));
        // Disjoint with a gap.
        assert!(!ranges_overlap(
            d("2024-06-01"),
            d("2024-06-03"),
            d("2024-06-04"),
            d("2024-06-06"),
        ));
    }

    #[test]
    fn date_range_validation() {
        assert!(validate_date_range(d("2024-06-01"), d("2024-06-02")).is_ok());
        assert!(validate_date_range(d("2024-06-02"), d("2024-06-01")).is_err());
        // Zero-night stay is invalid.
        assert!(validate_date_range(d("2024-06-01"), d("2024-06-01")).is_err());
    }

    #[test]
    fn cost_is_nights_times_rate() {
        let n = nights(d("2024-06-01"), d("2024-06-03"));
        assert_eq!(n, 2);
        assert_eq!(stay_cost(n, 120.0), 240.0);
        assert_eq!(stay_cost(nights(d("2024-06-01"), d("2024-06-08")), 340.0), 7.0 * 340.0);
    }

    #[test]
    fn rate_resolution_prefers_override() {
        assert_eq!(effective_rate(Some(150.0), Some(120.0)), 150.0);
        assert_eq!(effective_rate(None, Some(120.0)), 120.0);
        assert_eq!(effective_rate(None, None), 0.0);
    }
}
