//! Integration tests for the booking core.
//!
//! Exercises the repository layer against a real database:
//! - Booking with the atomic availability check
//! - Room-status lockstep across the reservation lifecycle
//! - The closed-interval overlap predicate, including the boundary-date case
//! - Concurrent double-booking defence
//! - Terminal-state transition rejection

use chrono::NaiveDate;
use herbanet_core::booking::{ReservationStatus, RoomStatus};
use herbanet_db::models::reservation::CreateReservation;
use herbanet_db::models::user::CreateUser;
use herbanet_db::repositories::{BookError, ReservationRepo, RoleRepo, RoomRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Create a CUSTOMER user to book with. The password hash is opaque at
/// this layer.
async fn new_guest(pool: &PgPool, username: &str) -> i64 {
    let role = RoleRepo::find_by_name(pool, "CUSTOMER")
        .await
        .unwrap()
        .expect("CUSTOMER role is seeded");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$test-hash".to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("Guest".to_string()),
            email: format!("{username}@example.com"),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
    .id
}

/// Look up a seeded room by number.
async fn room_id(pool: &PgPool, number: &str) -> i64 {
    RoomRepo::find_by_number(pool, number)
        .await
        .unwrap()
        .expect("seeded room exists")
        .id
}

fn booking(user_id: i64, room_id: i64, check_in: &str, check_out: &str) -> CreateReservation {
    CreateReservation {
        user_id,
        room_id,
        check_in: date(check_in),
        check_out: date(check_out),
        guest_count: 2,
    }
}

async fn room_status(pool: &PgPool, id: i64) -> String {
    RoomRepo::find_by_id(pool, id)
        .await
        .unwrap()
        .expect("room exists")
        .status
}

// ---------------------------------------------------------------------------
// Test: booking succeeds and flips the room to RESERVED
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_book_sets_room_reserved(pool: PgPool) {
    let guest = new_guest(&pool, "alice").await;
    let room = room_id(&pool, "101").await;

    let reservation = ReservationRepo::book(&pool, &booking(guest, room, "2024-06-01", "2024-06-03"))
        .await
        .unwrap();

    assert_eq!(reservation.status, ReservationStatus::Confirmed.as_str());
    assert_eq!(reservation.guest_count, 2);
    assert_eq!(room_status(&pool, room).await, RoomStatus::Reserved.as_str());

    // Cost is derived, not stored: 2 nights at the Standard base rate.
    let detail = ReservationRepo::find_detail(&pool, reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.nights(), 2);
    assert_eq!(detail.nightly_rate(), 120.0);
    assert_eq!(detail.total_cost(), 240.0);
}

// ---------------------------------------------------------------------------
// Test: overlapping second booking is refused
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_overlapping_booking_refused(pool: PgPool) {
    let alice = new_guest(&pool, "alice").await;
    let bob = new_guest(&pool, "bob").await;
    let room = room_id(&pool, "101").await;

    ReservationRepo::book(&pool, &booking(alice, room, "2024-06-01", "2024-06-03"))
        .await
        .unwrap();

    // Overlaps on 06-02. The room is also RESERVED by now, so the status
    // gate refuses before the overlap query runs.
    let err = ReservationRepo::book(&pool, &booking(bob, room, "2024-06-02", "2024-06-04"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, BookError::RoomUnavailable(_) | BookError::DatesUnavailable),
        "expected an availability refusal, got: {err:?}"
    );

    // Exactly one live reservation on the room.
    let overlapping = ReservationRepo::find_overlapping(
        &pool,
        room,
        date("2024-06-01"),
        date("2024-06-04"),
    )
    .await
    .unwrap();
    assert_eq!(overlapping.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: the full lifecycle drives room status in lockstep
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_lifecycle_lockstep(pool: PgPool) {
    let guest = new_guest(&pool, "alice").await;
    let room = room_id(&pool, "201").await;

    let reservation = ReservationRepo::book(&pool, &booking(guest, room, "2024-06-01", "2024-06-03"))
        .await
        .unwrap();
    assert_eq!(room_status(&pool, room).await, "RESERVED");

    let applied = ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
    )
    .await
    .unwrap();
    assert!(applied);
    assert_eq!(room_status(&pool, room).await, "OCCUPIED");

    let applied = ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
    )
    .await
    .unwrap();
    assert!(applied);
    assert_eq!(room_status(&pool, room).await, "AVAILABLE");

    let final_state = ReservationRepo::find_by_id(&pool, reservation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(final_state.status, "CHECKED_OUT");
}

// ---------------------------------------------------------------------------
// Test: cancel frees the room; the status guard rejects a second cancel
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_cancel_and_terminal_guard(pool: PgPool) {
    let guest = new_guest(&pool, "alice").await;
    let room = room_id(&pool, "102").await;

    let reservation = ReservationRepo::book(&pool, &booking(guest, room, "2024-07-10", "2024-07-12"))
        .await
        .unwrap();

    let applied = ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
    )
    .await
    .unwrap();
    assert!(applied);
    assert_eq!(room_status(&pool, room).await, "AVAILABLE");

    // The reservation is now CANCELLED; the guarded update misses.
    let applied = ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
    )
    .await
    .unwrap();
    assert!(!applied, "cancelling a cancelled reservation must not apply");
}

// ---------------------------------------------------------------------------
// Test: cancelled reservations free their dates for rebooking
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_cancelled_dates_are_rebookable(pool: PgPool) {
    let alice = new_guest(&pool, "alice").await;
    let bob = new_guest(&pool, "bob").await;
    let room = room_id(&pool, "102").await;

    let reservation = ReservationRepo::book(&pool, &booking(alice, room, "2024-07-10", "2024-07-12"))
        .await
        .unwrap();
    ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
    )
    .await
    .unwrap();

    // Same range, different guest: the cancelled row no longer blocks.
    ReservationRepo::book(&pool, &booking(bob, room, "2024-07-10", "2024-07-12"))
        .await
        .expect("cancelled reservation must not block rebooking");
}

// ---------------------------------------------------------------------------
// Test: boundary dates conflict under the closed-interval predicate
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_boundary_date_conflicts_after_checkout(pool: PgPool) {
    let alice = new_guest(&pool, "alice").await;
    let bob = new_guest(&pool, "bob").await;
    let room = room_id(&pool, "101").await;

    // Alice stays 06-01 to 06-03 and departs.
    let reservation = ReservationRepo::book(&pool, &booking(alice, room, "2024-06-01", "2024-06-03"))
        .await
        .unwrap();
    ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
    )
    .await
    .unwrap();
    ReservationRepo::transition(
        &pool,
        reservation.id,
        room,
        ReservationStatus::CheckedIn,
        ReservationStatus::CheckedOut,
    )
    .await
    .unwrap();
    assert_eq!(room_status(&pool, room).await, "AVAILABLE");

    // Bob asks for 06-03 to 06-05: shares the boundary date with the
    // checked-out stay, which still counts. No same-day turnover.
    let err = ReservationRepo::book(&pool, &booking(bob, room, "2024-06-03", "2024-06-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookError::DatesUnavailable));

    // One day later is clear.
    ReservationRepo::book(&pool, &booking(bob, room, "2024-06-04", "2024-06-06"))
        .await
        .expect("disjoint range must be bookable");
}

// ---------------------------------------------------------------------------
// Test: a room out of service is not bookable
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_room_in_maintenance_not_bookable(pool: PgPool) {
    let guest = new_guest(&pool, "alice").await;
    let room = room_id(&pool, "301").await;

    RoomRepo::update_status(&pool, room, RoomStatus::Maintenance.as_str())
        .await
        .unwrap();

    let err = ReservationRepo::book(&pool, &booking(guest, room, "2024-08-01", "2024-08-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookError::RoomUnavailable(status) if status == "MAINTENANCE"));
}

// ---------------------------------------------------------------------------
// Test: two concurrent bookings -- at most one wins
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_concurrent_bookings_one_winner(pool: PgPool) {
    let alice = new_guest(&pool, "alice").await;
    let bob = new_guest(&pool, "bob").await;
    let room = room_id(&pool, "202").await;

    let a = booking(alice, room, "2024-09-01", "2024-09-04");
    let b = booking(bob, room, "2024-09-02", "2024-09-05");

    // Both tasks race on the same room; the FOR UPDATE lock serializes
    // them and the loser sees the winner's committed reservation.
    let (res_a, res_b) = tokio::join!(
        ReservationRepo::book(&pool, &a),
        ReservationRepo::book(&pool, &b),
    );

    let successes = [res_a.is_ok(), res_b.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1, "exactly one concurrent booking must win");

    let overlapping = ReservationRepo::find_overlapping(
        &pool,
        room,
        date("2024-09-01"),
        date("2024-09-05"),
    )
    .await
    .unwrap();
    assert_eq!(overlapping.len(), 1, "no overbooked room after the race");
}

// ---------------------------------------------------------------------------
// Test: availability search excludes overlapping and out-of-service rooms
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_availability_search(pool: PgPool) {
    let guest = new_guest(&pool, "alice").await;
    let booked = room_id(&pool, "101").await;
    let maintenance = room_id(&pool, "301").await;

    ReservationRepo::book(&pool, &booking(guest, booked, "2024-06-01", "2024-06-03"))
        .await
        .unwrap();
    RoomRepo::update_status(&pool, maintenance, RoomStatus::Maintenance.as_str())
        .await
        .unwrap();

    let available = RoomRepo::find_available(&pool, date("2024-06-02"), date("2024-06-04"))
        .await
        .unwrap();
    let numbers: Vec<&str> = available.iter().map(|r| r.room_number.as_str()).collect();

    assert!(!numbers.contains(&"101"), "overlapping room must be excluded");
    assert!(!numbers.contains(&"301"), "maintenance room must be excluded");
    assert!(numbers.contains(&"102"));
    assert!(numbers.contains(&"201"));
    assert!(numbers.contains(&"202"));

    // A disjoint window later in the year only excludes the
    // out-of-service room: the closed predicate does not reach 06-03.
    let later = RoomRepo::find_available(&pool, date("2024-06-04"), date("2024-06-06"))
        .await
        .unwrap();
    let numbers: Vec<&str> = later.iter().map(|r| r.room_number.as_str()).collect();
    assert!(!numbers.contains(&"101"), "room still RESERVED by status");
    assert!(!numbers.contains(&"301"));
}
