//! # Car Rental Contract
//!
//! Rental ledger for the vehicle NFT catalog: validates and executes the
//! booking, return and guarantee-settlement sequence, owns all cost and
//! interest arithmetic, and escrows payment in a configured token.
//!
//! | Phase      | Entry Point(s)                                     |
//! |------------|----------------------------------------------------|
//! | Bootstrap  | [`CarRental::init`], [`CarRental::set_contracts`]  |
//! | Booking    | [`CarRental::create_rental`]                       |
//! | Return     | [`CarRental::return_rental`]                       |
//! | Settlement | [`CarRental::refund_guarantee`]                    |
//! | Queries    | `get_rental`, `rental_count`, `calculate_rental_cost`, `calculate_return_interest` |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`] and the arithmetic to
//! [`pricing`]; this file holds the entry points, the state machine checks
//! and the event emissions. The vehicle catalog is reached through its
//! generated client, the escrow token through `token::Client`.
//!
//! Every failing entry point leaves stored state untouched: a returned
//! error aborts the invocation and the host rolls the frame back, so state
//! mutation and transfer authorization commit together or not at all.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

use vehicle_nft::{Vehicle, VehicleNftClient};

mod events;
mod pricing;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test;
#[cfg(test)]
mod test_events;

pub use events::{GuaranteeRefunded, RentalCreated, RentalReturned};
pub use types::{Rental, RentalConfig, RentalState, RentalStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    NotAuthorized      = 3,
    VehicleNotFound    = 4,
    VehicleUnavailable = 5,
    InvalidDateRange   = 6,
    InsufficientFunds  = 7,
    RentalNotFound     = 8,
    RentalNotActive    = 9,
    RentalNotReturned  = 10,
    AlreadyRefunded    = 11,
    MathOverflow       = 12,
}

#[contract]
pub struct CarRental;

#[contractimpl]
impl CarRental {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract with its administrator, the vehicle catalog
    /// address and the escrow token address.
    ///
    /// Must be called exactly once after deployment; subsequent calls fail
    /// with [`Error::AlreadyInitialized`].
    pub fn init(
        env: Env,
        admin: Address,
        vehicle_contract: Address,
        payment_token: Address,
    ) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_vehicle_contract(&env, &vehicle_contract);
        storage::set_payment_token(&env, &payment_token);
        Ok(())
    }

    /// Re-point the catalog and escrow token addresses. Admin only.
    pub fn set_contracts(
        env: Env,
        caller: Address,
        vehicle_contract: Address,
        payment_token: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        let admin = storage::get_admin(&env).ok_or(Error::NotInitialized)?;
        if caller != admin {
            return Err(Error::NotAuthorized);
        }
        storage::set_vehicle_contract(&env, &vehicle_contract);
        storage::set_payment_token(&env, &payment_token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Booking
    // ─────────────────────────────────────────────────────────

    /// Book a vehicle for `[start_date, end_date)` and escrow the payment.
    ///
    /// `paid_amount` is the renter's offer ceiling: the contract draws
    /// exactly `cost + guarantee` from their balance and never touches the
    /// surplus, so there is no overpayment to refund. A receipt token is
    /// minted to the renter in the catalog and the vehicle is flagged as
    /// rented until the return.
    pub fn create_rental(
        env: Env,
        renter: Address,
        token_id: u64,
        start_date: u64,
        end_date: u64,
        paid_amount: i128,
    ) -> Result<Rental, Error> {
        renter.require_auth();

        let catalog = catalog_client(&env)?;
        let vehicle = load_vehicle(&catalog, token_id)?;

        if end_date <= start_date {
            return Err(Error::InvalidDateRange);
        }
        if vehicle.rented {
            return Err(Error::VehicleUnavailable);
        }

        let total_days = pricing::billable_days(start_date, end_date);
        let total_price =
            pricing::rental_cost(vehicle.price_per_day, total_days).ok_or(Error::MathOverflow)?;
        let required = total_price
            .checked_add(vehicle.guarantee)
            .ok_or(Error::MathOverflow)?;
        if paid_amount < required {
            return Err(Error::InsufficientFunds);
        }

        let contract = env.current_contract_address();

        // Escrow cost plus guarantee for the duration of the rental.
        payment_client(&env)?.transfer(&renter, &contract, &required);

        let receipt_token_id = catalog.mint_receipt(&contract, &renter);
        let rental_id = storage::next_rental_id(&env);

        let rental = Rental {
            rental_id,
            token_id,
            renter: renter.clone(),
            start_date,
            end_date,
            total_days,
            total_price,
            total_interest: 0,
            receipt_token_id,
            status: RentalStatus::Active,
        };
        storage::save_rental(&env, &rental);
        catalog.set_rented(&contract, &token_id, &true);

        events::rental_created(&env, rental_id, token_id, &renter, total_price);
        Ok(rental)
    }

    // ─────────────────────────────────────────────────────────
    // Return
    // ─────────────────────────────────────────────────────────

    /// Close an active rental at the current ledger time.
    ///
    /// Fixes the late-return interest from the stored `end_date`, releases
    /// the vehicle back to the catalog and flags it as awaiting guarantee
    /// settlement. Returning early, even before `start_date`, is permitted
    /// and accrues no interest.
    pub fn return_rental(env: Env, rental_id: u64) -> Result<Rental, Error> {
        let config = storage::load_rental_config(&env, rental_id).ok_or(Error::RentalNotFound)?;
        let mut state = storage::load_rental_state(&env, rental_id).ok_or(Error::RentalNotFound)?;
        if state.status != RentalStatus::Active {
            return Err(Error::RentalNotActive);
        }

        let catalog = catalog_client(&env)?;
        let vehicle = load_vehicle(&catalog, config.token_id)?;

        let now = env.ledger().timestamp();
        let late = pricing::late_days(config.end_date, now);
        let interest = pricing::late_interest(vehicle.guarantee, vehicle.late_interest_rate, late)
            .ok_or(Error::MathOverflow)?;

        state.status = RentalStatus::Returned;
        state.total_interest = interest;
        storage::save_rental_state(&env, rental_id, &state);

        let contract = env.current_contract_address();
        catalog.set_rented(&contract, &config.token_id, &false);
        catalog.set_pending_settlement(&contract, &config.token_id, &true);

        events::rental_returned(&env, rental_id, config.token_id, interest);
        Ok(Rental::from_parts(config, state))
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Settle the guarantee of a returned rental. Returns the renter payout.
    ///
    /// The renter receives `guarantee - total_interest`; the vehicle owner
    /// receives the interest plus the escrowed rental fee. Payout plus
    /// interest always equals the guarantee exactly. State is committed
    /// before any token leaves the contract, so a re-entrant call observes
    /// the rental as settled and fails with [`Error::AlreadyRefunded`].
    pub fn refund_guarantee(env: Env, rental_id: u64) -> Result<i128, Error> {
        let config = storage::load_rental_config(&env, rental_id).ok_or(Error::RentalNotFound)?;
        let mut state = storage::load_rental_state(&env, rental_id).ok_or(Error::RentalNotFound)?;
        match state.status {
            RentalStatus::Active => return Err(Error::RentalNotReturned),
            RentalStatus::Settled => return Err(Error::AlreadyRefunded),
            RentalStatus::Returned => {}
        }

        let catalog = catalog_client(&env)?;
        let vehicle = load_vehicle(&catalog, config.token_id)?;
        let owner = catalog.owner_of(&config.token_id);
        let payments = payment_client(&env)?;

        // Interest is capped at the guarantee, so the payout is never negative.
        let payout = vehicle.guarantee - state.total_interest;
        let owner_total = state
            .total_interest
            .checked_add(config.total_price)
            .ok_or(Error::MathOverflow)?;

        state.status = RentalStatus::Settled;
        storage::save_rental_state(&env, rental_id, &state);

        let contract = env.current_contract_address();
        catalog.set_pending_settlement(&contract, &config.token_id, &false);

        if payout > 0 {
            payments.transfer(&contract, &config.renter, &payout);
        }
        if owner_total > 0 {
            payments.transfer(&contract, &owner, &owner_total);
        }

        events::guarantee_refunded(&env, rental_id, &config.renter, payout, state.total_interest);
        Ok(payout)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a rental by id, open or closed.
    pub fn get_rental(env: Env, rental_id: u64) -> Result<Rental, Error> {
        storage::load_rental(&env, rental_id).ok_or(Error::RentalNotFound)
    }

    /// Number of rentals ever created.
    pub fn rental_count(env: Env) -> u64 {
        storage::rental_count(&env)
    }

    /// Price of renting `token_id` over the given window, before booking.
    ///
    /// Day count is the ceiling of the window, minimum one day.
    pub fn calculate_rental_cost(
        env: Env,
        token_id: u64,
        start_date: u64,
        end_date: u64,
    ) -> Result<i128, Error> {
        let catalog = catalog_client(&env)?;
        let vehicle = load_vehicle(&catalog, token_id)?;
        if end_date <= start_date {
            return Err(Error::InvalidDateRange);
        }
        let days = pricing::billable_days(start_date, end_date);
        pricing::rental_cost(vehicle.price_per_day, days).ok_or(Error::MathOverflow)
    }

    /// Late-return interest for a rental.
    ///
    /// For a returned rental this is the stored, final amount. For an
    /// active rental it is a live estimate at the current ledger time,
    /// non-decreasing in time and never above the guarantee.
    pub fn calculate_return_interest(env: Env, rental_id: u64) -> Result<i128, Error> {
        let config = storage::load_rental_config(&env, rental_id).ok_or(Error::RentalNotFound)?;
        let state = storage::load_rental_state(&env, rental_id).ok_or(Error::RentalNotFound)?;
        if state.status != RentalStatus::Active {
            return Ok(state.total_interest);
        }

        let catalog = catalog_client(&env)?;
        let vehicle = load_vehicle(&catalog, config.token_id)?;
        let now = env.ledger().timestamp();
        let late = pricing::late_days(config.end_date, now);
        pricing::late_interest(vehicle.guarantee, vehicle.late_interest_rate, late)
            .ok_or(Error::MathOverflow)
    }
}

fn catalog_client(env: &Env) -> Result<VehicleNftClient<'_>, Error> {
    let address = storage::get_vehicle_contract(env).ok_or(Error::NotInitialized)?;
    Ok(VehicleNftClient::new(env, &address))
}

fn payment_client(env: &Env) -> Result<token::Client<'_>, Error> {
    let address = storage::get_payment_token(env).ok_or(Error::NotInitialized)?;
    Ok(token::Client::new(env, &address))
}

fn load_vehicle(catalog: &VehicleNftClient, token_id: u64) -> Result<Vehicle, Error> {
    if !catalog.has_vehicle(&token_id) {
        return Err(Error::VehicleNotFound);
    }
    Ok(catalog.get_vehicle(&token_id))
}
