extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

use crate::{invariants, CarRental, CarRentalClient, Error, RentalStatus};

const DAY: u64 = 86_400;
const START: u64 = 1_700_000_000;

struct Setup {
    env: Env,
    nft: vehicle_nft::VehicleNftClient<'static>,
    rental: CarRentalClient<'static>,
    admin: Address,
    owner: Address,
    renter: Address,
    token: token::Client<'static>,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = START);

    let nft_id = env.register(vehicle_nft::VehicleNft, ());
    let nft = vehicle_nft::VehicleNftClient::new(&env, &nft_id);
    let rental_id = env.register(CarRental, ());
    let rental = CarRentalClient::new(&env, &rental_id);

    let admin = Address::generate(&env);
    let owner = Address::generate(&env);
    let renter = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac.address());
    token::StellarAssetClient::new(&env, &sac.address()).mint(&renter, &10_000);

    nft.init(&admin);
    nft.set_rental_contract(&admin, &rental_id);
    rental.init(&admin, &nft_id, &sac.address());

    Setup {
        env,
        nft,
        rental,
        admin,
        owner,
        renter,
        token,
    }
}

/// Mint the reference vehicle: 100/day, 100 guarantee, 10 percent per
/// late day.
fn mint_vehicle(s: &Setup) -> u64 {
    s.nft.mint_vehicle(
        &s.admin,
        &s.owner,
        &String::from_str(&s.env, "Compact sedan"),
        &String::from_str(&s.env, "ipfs://sedan.png"),
        &String::from_str(&s.env, "4 seats, automatic"),
        &String::from_str(&s.env, "ABC123"),
        &100i128,
        &100i128,
        &10u32,
    )
}

/// Book `token_id` from the current ledger time for `days` days.
fn book(s: &Setup, token_id: u64, days: u64, paid: i128) -> crate::Rental {
    let start = s.env.ledger().timestamp();
    let end = start + days * DAY;
    s.rental
        .create_rental(&s.renter, &token_id, &start, &end, &paid)
}

fn advance(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

// ─────────────────────────────────────────────────────────
// Booking
// ─────────────────────────────────────────────────────────

#[test]
fn test_create_rental_books_and_escrows() {
    let s = setup();
    let token_id = mint_vehicle(&s);

    let rental = book(&s, token_id, 1, 200);

    assert_eq!(rental.rental_id, 0);
    assert_eq!(rental.token_id, token_id);
    assert_eq!(rental.renter, s.renter);
    assert_eq!(rental.total_days, 1);
    assert_eq!(rental.total_price, 100);
    assert_eq!(rental.total_interest, 0);
    assert_eq!(rental.status, RentalStatus::Active);
    assert!(rental.active());
    assert!(!rental.returned());
    assert!(!rental.guarantee_refunded());
    invariants::assert_billing(&rental, 100);

    // A receipt token was minted to the renter in the catalog.
    assert_eq!(rental.receipt_token_id, 1);
    assert_eq!(s.nft.owner_of(&rental.receipt_token_id), s.renter);

    // The vehicle is flagged as out.
    assert!(s.nft.get_vehicle(&token_id).rented);

    // Exactly cost + guarantee moved into escrow.
    assert_eq!(s.token.balance(&s.renter), 9_800);
    assert_eq!(s.token.balance(&s.rental.address), 200);

    assert_eq!(s.rental.get_rental(&0), rental);
    assert_eq!(s.rental.rental_count(), 1);
}

#[test]
fn test_booking_requires_sufficient_funds() {
    let s = setup();
    let token_id = mint_vehicle(&s);

    let start = s.env.ledger().timestamp();
    let end = start + DAY;
    let result = s
        .rental
        .try_create_rental(&s.renter, &token_id, &start, &end, &150i128);
    assert_eq!(result, Err(Ok(Error::InsufficientFunds)));

    // Nothing happened: no rental, no escrow, vehicle still available.
    assert_eq!(s.rental.rental_count(), 0);
    assert_eq!(s.token.balance(&s.renter), 10_000);
    assert!(!s.nft.get_vehicle(&token_id).rented);
}

#[test]
fn test_no_double_booking() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    book(&s, token_id, 1, 200);

    let start = s.env.ledger().timestamp();
    let end = start + DAY;
    let result = s
        .rental
        .try_create_rental(&s.renter, &token_id, &start, &end, &200i128);
    assert_eq!(result, Err(Ok(Error::VehicleUnavailable)));
    assert_eq!(s.rental.rental_count(), 1);
}

#[test]
fn test_booking_rejects_invalid_date_range() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let start = s.env.ledger().timestamp();

    for end in [start, start - 1] {
        let result = s
            .rental
            .try_create_rental(&s.renter, &token_id, &start, &end, &200i128);
        assert_eq!(result, Err(Ok(Error::InvalidDateRange)));
    }
    assert_eq!(
        s.rental.try_calculate_rental_cost(&token_id, &start, &start),
        Err(Ok(Error::InvalidDateRange))
    );
}

#[test]
fn test_booking_unknown_vehicle_fails() {
    let s = setup();
    let start = s.env.ledger().timestamp();
    let end = start + DAY;

    let result = s
        .rental
        .try_create_rental(&s.renter, &7, &start, &end, &200i128);
    assert_eq!(result, Err(Ok(Error::VehicleNotFound)));
    assert_eq!(
        s.rental.try_calculate_rental_cost(&7, &start, &end),
        Err(Ok(Error::VehicleNotFound))
    );
}

#[test]
fn test_overpayment_is_never_drawn() {
    let s = setup();
    let token_id = mint_vehicle(&s);

    // Offering far more than required still only escrows cost + guarantee.
    book(&s, token_id, 1, 5_000);
    assert_eq!(s.token.balance(&s.renter), 9_800);
    assert_eq!(s.token.balance(&s.rental.address), 200);
}

#[test]
fn test_sub_day_spans_bill_whole_days() {
    let s = setup();
    let token_id = mint_vehicle(&s);

    let start = s.env.ledger().timestamp();
    // 25 hours round up to 2 billable days.
    assert_eq!(
        s.rental
            .calculate_rental_cost(&token_id, &start, &(start + 25 * 3_600)),
        200
    );
    // 30 minutes still bill a full day.
    assert_eq!(
        s.rental
            .calculate_rental_cost(&token_id, &start, &(start + 1_800)),
        100
    );

    let rental = s.rental.create_rental(
        &s.renter,
        &token_id,
        &start,
        &(start + 25 * 3_600),
        &1_000i128,
    );
    assert_eq!(rental.total_days, 2);
    assert_eq!(rental.total_price, 200);
    invariants::assert_billing(&rental, 100);
}

// ─────────────────────────────────────────────────────────
// Return
// ─────────────────────────────────────────────────────────

#[test]
fn test_return_on_time_has_zero_interest() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 2, 1_000);

    advance(&s.env, DAY);
    let returned = s.rental.return_rental(&booked.rental_id);

    assert_eq!(returned.status, RentalStatus::Returned);
    assert_eq!(returned.total_interest, 0);
    assert!(returned.returned());
    assert!(!returned.guarantee_refunded());
    invariants::assert_valid_status_transition(&booked.status, &returned.status);

    // The vehicle is back in the catalog, awaiting settlement.
    let vehicle = s.nft.get_vehicle(&token_id);
    assert!(!vehicle.rented);
    assert!(vehicle.pending_settlement);
}

#[test]
fn test_return_before_start_date_is_permitted() {
    let s = setup();
    let token_id = mint_vehicle(&s);

    // Booking a window that starts five days from now.
    let start = s.env.ledger().timestamp() + 5 * DAY;
    let rental = s
        .rental
        .create_rental(&s.renter, &token_id, &start, &(start + DAY), &200i128);

    // Returning immediately, before the window even opens, accrues nothing.
    let returned = s.rental.return_rental(&rental.rental_id);
    assert_eq!(returned.total_interest, 0);
    assert_eq!(returned.status, RentalStatus::Returned);
}

#[test]
fn test_return_three_days_late_charges_interest() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    // One rental day, then three full days of lateness.
    advance(&s.env, DAY + 3 * DAY);
    let returned = s.rental.return_rental(&booked.rental_id);

    // 3 late days * 10 percent of the 100 guarantee.
    assert_eq!(returned.total_interest, 30);
    invariants::assert_interest_capped(returned.total_interest, 100);

    // The stored value is final: more time passing changes nothing.
    advance(&s.env, 30 * DAY);
    assert_eq!(s.rental.calculate_return_interest(&booked.rental_id), 30);
}

#[test]
fn test_interest_caps_at_the_guarantee() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    // Fifteen days late would be 150 percent; the cap holds it at the
    // full guarantee.
    advance(&s.env, DAY + 15 * DAY);
    let returned = s.rental.return_rental(&booked.rental_id);
    assert_eq!(returned.total_interest, 100);
    invariants::assert_interest_capped(returned.total_interest, 100);
}

#[test]
fn test_return_twice_fails() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    advance(&s.env, DAY);
    s.rental.return_rental(&booked.rental_id);
    assert_eq!(
        s.rental.try_return_rental(&booked.rental_id),
        Err(Ok(Error::RentalNotActive))
    );
}

#[test]
fn test_return_unknown_rental_fails() {
    let s = setup();
    assert_eq!(
        s.rental.try_return_rental(&9),
        Err(Ok(Error::RentalNotFound))
    );
    assert_eq!(s.rental.try_get_rental(&9), Err(Ok(Error::RentalNotFound)));
}

#[test]
fn test_interest_estimate_is_monotonic_and_capped() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    let mut previous = 0i128;
    for _ in 0..40 {
        let estimate = s.rental.calculate_return_interest(&booked.rental_id);
        invariants::assert_interest_monotonic(previous, estimate);
        invariants::assert_interest_capped(estimate, 100);
        previous = estimate;
        advance(&s.env, DAY / 2);
    }
    // 40 half-days past a 1-day booking is deep into the cap.
    assert_eq!(previous, 100);
}

// ─────────────────────────────────────────────────────────
// Settlement
// ─────────────────────────────────────────────────────────

#[test]
fn test_refund_guarantee_pays_renter_and_owner() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    advance(&s.env, DAY + 3 * DAY);
    s.rental.return_rental(&booked.rental_id);

    let payout = s.rental.refund_guarantee(&booked.rental_id);
    assert_eq!(payout, 70);
    invariants::assert_conservation(100, payout, 30);

    // Renter: 10_000 - 200 escrowed + 70 back. Owner: 100 fee + 30 interest.
    assert_eq!(s.token.balance(&s.renter), 9_870);
    assert_eq!(s.token.balance(&s.owner), 130);
    assert_eq!(s.token.balance(&s.rental.address), 0);

    let settled = s.rental.get_rental(&booked.rental_id);
    assert_eq!(settled.status, RentalStatus::Settled);
    assert!(settled.guarantee_refunded());
    assert!(!s.nft.get_vehicle(&token_id).pending_settlement);
}

#[test]
fn test_refund_with_exhausted_guarantee_pays_renter_nothing() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    advance(&s.env, DAY + 15 * DAY);
    s.rental.return_rental(&booked.rental_id);

    let payout = s.rental.refund_guarantee(&booked.rental_id);
    assert_eq!(payout, 0);
    invariants::assert_conservation(100, payout, 100);

    assert_eq!(s.token.balance(&s.renter), 9_800);
    assert_eq!(s.token.balance(&s.owner), 200);
    assert_eq!(s.token.balance(&s.rental.address), 0);
}

#[test]
fn test_refund_requires_return_and_is_terminal() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    assert_eq!(
        s.rental.try_refund_guarantee(&booked.rental_id),
        Err(Ok(Error::RentalNotReturned))
    );

    advance(&s.env, DAY);
    s.rental.return_rental(&booked.rental_id);
    s.rental.refund_guarantee(&booked.rental_id);

    let renter_before = s.token.balance(&s.renter);
    let owner_before = s.token.balance(&s.owner);
    assert_eq!(
        s.rental.try_refund_guarantee(&booked.rental_id),
        Err(Ok(Error::AlreadyRefunded))
    );
    // The failed second call moved no funds.
    assert_eq!(s.token.balance(&s.renter), renter_before);
    assert_eq!(s.token.balance(&s.owner), owner_before);

    assert_eq!(
        s.rental.try_refund_guarantee(&9),
        Err(Ok(Error::RentalNotFound))
    );
}

// ─────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_rental_ids_are_sequential() {
    let s = setup();
    let first = mint_vehicle(&s);
    let second = mint_vehicle(&s);

    let r0 = book(&s, first, 1, 200);
    let r1 = book(&s, second, 1, 200);

    invariants::assert_sequential_ids(&[r0, r1]);
    assert_eq!(s.rental.rental_count(), 2);
}

#[test]
fn test_booking_terms_are_immutable() {
    let s = setup();
    let token_id = mint_vehicle(&s);
    let booked = book(&s, token_id, 1, 200);

    advance(&s.env, DAY + 2 * DAY);
    s.rental.return_rental(&booked.rental_id);
    let after_return = s.rental.get_rental(&booked.rental_id);
    invariants::assert_immutable_fields(&booked, &after_return);

    s.rental.refund_guarantee(&booked.rental_id);
    let after_refund = s.rental.get_rental(&booked.rental_id);
    invariants::assert_immutable_fields(&booked, &after_refund);
    invariants::assert_valid_status_transition(&after_return.status, &after_refund.status);
}

#[test]
fn test_vehicle_can_be_rebooked_after_settlement() {
    let s = setup();
    let token_id = mint_vehicle(&s);

    let first = book(&s, token_id, 1, 200);
    advance(&s.env, DAY);
    s.rental.return_rental(&first.rental_id);
    s.rental.refund_guarantee(&first.rental_id);

    let vehicle = s.nft.get_vehicle(&token_id);
    assert!(!vehicle.rented);
    assert!(!vehicle.pending_settlement);

    let second = book(&s, token_id, 2, 1_000);
    assert_eq!(second.rental_id, 1);
    assert!(second.active());
    assert!(s.nft.get_vehicle(&token_id).rented);

    // The closed record is still readable.
    assert_eq!(
        s.rental.get_rental(&first.rental_id).status,
        RentalStatus::Settled
    );
}

// ─────────────────────────────────────────────────────────
// Bootstrap
// ─────────────────────────────────────────────────────────

#[test]
fn test_init_twice_fails() {
    let s = setup();
    let other = Address::generate(&s.env);
    assert_eq!(
        s.rental
            .try_init(&other, &s.nft.address, &s.token.address),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_set_contracts_requires_admin() {
    let s = setup();
    let outsider = Address::generate(&s.env);
    assert_eq!(
        s.rental
            .try_set_contracts(&outsider, &s.nft.address, &s.token.address),
        Err(Ok(Error::NotAuthorized))
    );
}
