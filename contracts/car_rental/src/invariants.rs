#![allow(dead_code)]

extern crate std;

use crate::types::{Rental, RentalStatus};

/// Billing invariant: a booking always bills at least one day and the
/// snapshotted price is exactly days times the per-day rate.
pub fn assert_billing(rental: &Rental, price_per_day: i128) {
    assert!(
        rental.total_days >= 1,
        "billing violated: rental {} bills {} days",
        rental.rental_id,
        rental.total_days
    );
    assert_eq!(
        rental.total_price,
        rental.total_days as i128 * price_per_day,
        "billing violated: rental {} price {} != {} days * {}",
        rental.rental_id,
        rental.total_price,
        rental.total_days,
        price_per_day
    );
}

/// Interest is bounded by the guarantee: the renter's maximum loss is the
/// deposit itself.
pub fn assert_interest_capped(interest: i128, guarantee: i128) {
    assert!(
        (0..=guarantee).contains(&interest),
        "cap violated: interest {interest} outside [0, {guarantee}]"
    );
}

/// Interest estimates never decrease as time advances.
pub fn assert_interest_monotonic(before: i128, after: i128) {
    assert!(
        after >= before,
        "monotonicity violated: interest went from {before} to {after}"
    );
}

/// Conservation law: the settlement payout plus the retained interest is
/// exactly the guarantee.
pub fn assert_conservation(guarantee: i128, payout: i128, interest: i128) {
    assert_eq!(
        payout + interest,
        guarantee,
        "conservation violated: {payout} + {interest} != {guarantee}"
    );
}

/// Status transition validity. Only forward transitions are allowed:
///   Active   -> Returned
///   Returned -> Settled
///   Settled  -> (none)
pub fn assert_valid_status_transition(from: &RentalStatus, to: &RentalStatus) {
    let valid = matches!(
        (from, to),
        (RentalStatus::Active, RentalStatus::Returned)
            | (RentalStatus::Returned, RentalStatus::Settled)
    );

    assert!(
        valid,
        "invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// Rental IDs are sequential starting from 0.
pub fn assert_sequential_ids(rentals: &[Rental]) {
    for (i, rental) in rentals.iter().enumerate() {
        assert_eq!(
            rental.rental_id, i as u64,
            "expected id {}, got {}",
            i, rental.rental_id
        );
    }
}

/// Booking terms never change after creation. Only `status` and
/// `total_interest` may differ between two snapshots of the same rental.
pub fn assert_immutable_fields(original: &Rental, current: &Rental) {
    assert_eq!(original.rental_id, current.rental_id, "rental id changed");
    assert_eq!(original.token_id, current.token_id, "token id changed");
    assert_eq!(original.renter, current.renter, "renter changed");
    assert_eq!(original.start_date, current.start_date, "start date changed");
    assert_eq!(original.end_date, current.end_date, "end date changed");
    assert_eq!(original.total_days, current.total_days, "total days changed");
    assert_eq!(
        original.total_price, current.total_price,
        "total price changed"
    );
    assert_eq!(
        original.receipt_token_id, current.receipt_token_id,
        "receipt token changed"
    );
}
