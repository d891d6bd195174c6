//! # Vehicle NFT Catalog Contract
//!
//! One token per vehicle, minted with its rental terms. The catalog is the
//! single source of truth for whether a vehicle is currently booked; only
//! the registered rental contract may flip the availability flags.
//!
//! | Phase       | Entry Point(s)                                        |
//! |-------------|-------------------------------------------------------|
//! | Bootstrap   | [`VehicleNft::init`], [`VehicleNft::set_rental_contract`] |
//! | Minting     | [`VehicleNft::mint_vehicle`], [`VehicleNft::mint_receipt`] |
//! | Availability| [`VehicleNft::set_rented`], [`VehicleNft::set_pending_settlement`] |
//! | Queries     | `get_vehicle`, `has_vehicle`, `list_vehicles`, `owner_of`, `balance_of`, `total_supply` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`]. This file contains only
//! the public entry points, authorization checks and event emissions.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

mod events;
mod storage;
mod types;


pub use events::{ReceiptMinted, VehicleMinted};
pub use types::{Vehicle, VehicleConfig, VehicleState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    NotAuthorized      = 3,
    VehicleNotFound    = 4,
    TokenNotFound      = 5,
    InvalidTerms       = 6,
}

#[contract]
pub struct VehicleNft;

#[contractimpl]
impl VehicleNft {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and set the administrator.
    ///
    /// Must be called exactly once after deployment; subsequent calls fail
    /// with [`Error::AlreadyInitialized`].
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        Ok(())
    }

    /// Register the rental contract allowed to mutate availability flags
    /// and mint receipt tokens.
    ///
    /// Admin only. May be called again to point at a redeployed rental
    /// contract.
    pub fn set_rental_contract(env: Env, caller: Address, rental: Address) -> Result<(), Error> {
        caller.require_auth();
        require_admin(&env, &caller)?;
        storage::set_rental_contract(&env, &rental);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Minting
    // ─────────────────────────────────────────────────────────

    /// Mint a vehicle token to `owner` with its rental terms.
    ///
    /// Admin only. Token ids are sequential and never reused. Fails with
    /// [`Error::InvalidTerms`] when `name` or `license_plate` is empty or a
    /// numeric term is negative. New vehicles start available.
    #[allow(clippy::too_many_arguments)]
    pub fn mint_vehicle(
        env: Env,
        minter: Address,
        owner: Address,
        name: String,
        image_uri: String,
        features: String,
        license_plate: String,
        price_per_day: i128,
        guarantee: i128,
        late_interest_rate: u32,
    ) -> Result<u64, Error> {
        minter.require_auth();
        require_admin(&env, &minter)?;

        if name.len() == 0 || license_plate.len() == 0 {
            return Err(Error::InvalidTerms);
        }
        if price_per_day < 0 || guarantee < 0 {
            return Err(Error::InvalidTerms);
        }

        let token_id = storage::next_token_id(&env);

        let vehicle = Vehicle {
            token_id,
            name,
            image_uri,
            features,
            license_plate,
            price_per_day,
            guarantee,
            late_interest_rate,
            rented: false,
            pending_settlement: false,
        };

        storage::save_vehicle(&env, &vehicle);
        storage::set_token_owner(&env, token_id, &owner);

        events::vehicle_minted(&env, token_id, &owner, price_per_day, guarantee);
        Ok(token_id)
    }

    /// Mint a bare receipt token to `to`.
    ///
    /// Rental contract only. The receipt shares the vehicle token id space
    /// but carries no vehicle record; it marks `to` as party to a rental.
    pub fn mint_receipt(env: Env, caller: Address, to: Address) -> Result<u64, Error> {
        caller.require_auth();
        require_rental_contract(&env, &caller)?;

        let token_id = storage::next_token_id(&env);
        storage::set_token_owner(&env, token_id, &to);

        events::receipt_minted(&env, token_id, &to);
        Ok(token_id)
    }

    // ─────────────────────────────────────────────────────────
    // Availability flags
    // ─────────────────────────────────────────────────────────

    /// Flip the rented flag. Rental contract only.
    ///
    /// Setting the flag to its current value is a no-op, not an error.
    pub fn set_rented(env: Env, caller: Address, token_id: u64, rented: bool) -> Result<(), Error> {
        caller.require_auth();
        require_rental_contract(&env, &caller)?;

        let mut state = storage::load_vehicle_state(&env, token_id).ok_or(Error::VehicleNotFound)?;
        if state.rented != rented {
            state.rented = rented;
            storage::save_vehicle_state(&env, token_id, &state);
        }
        Ok(())
    }

    /// Flip the pending-settlement flag. Rental contract only. Idempotent.
    pub fn set_pending_settlement(
        env: Env,
        caller: Address,
        token_id: u64,
        pending: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        require_rental_contract(&env, &caller)?;

        let mut state = storage::load_vehicle_state(&env, token_id).ok_or(Error::VehicleNotFound)?;
        if state.pending_settlement != pending {
            state.pending_settlement = pending;
            storage::save_vehicle_state(&env, token_id, &state);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a vehicle by token id.
    ///
    /// Receipt token ids fail with [`Error::VehicleNotFound`] just like ids
    /// that were never minted.
    pub fn get_vehicle(env: Env, token_id: u64) -> Result<Vehicle, Error> {
        storage::load_vehicle(&env, token_id).ok_or(Error::VehicleNotFound)
    }

    /// True when `token_id` carries a vehicle record.
    pub fn has_vehicle(env: Env, token_id: u64) -> bool {
        storage::has_vehicle(&env, token_id)
    }

    /// All vehicles in mint order.
    pub fn list_vehicles(env: Env) -> Vec<Vehicle> {
        let mut vehicles = Vec::new(&env);
        for id in storage::vehicle_ids(&env).iter() {
            if let Some(vehicle) = storage::load_vehicle(&env, id) {
                vehicles.push_back(vehicle);
            }
        }
        vehicles
    }

    /// Owner of a token, vehicle or receipt.
    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        storage::token_owner(&env, token_id).ok_or(Error::TokenNotFound)
    }

    /// Number of tokens held by `owner`.
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        storage::owner_count(&env, &owner)
    }

    /// Total number of tokens minted, vehicles and receipts combined.
    pub fn total_supply(env: Env) -> u64 {
        storage::token_count(&env)
    }

    /// Current administrator.
    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env).ok_or(Error::NotInitialized)
    }
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = storage::get_admin(env).ok_or(Error::NotInitialized)?;
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn require_rental_contract(env: &Env, caller: &Address) -> Result<(), Error> {
    let rental = storage::get_rental_contract(env).ok_or(Error::NotAuthorized)?;
    if caller != &rental {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}
