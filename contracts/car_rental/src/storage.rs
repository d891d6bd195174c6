//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key               | Type      | Description                        |
//! |-------------------|-----------|------------------------------------|
//! | `Admin`           | `Address` | Contract administrator             |
//! | `VehicleContract` | `Address` | Vehicle catalog contract           |
//! | `PaymentToken`    | `Address` | Token used for escrow and payouts  |
//! | `RentalCount`     | `u64`     | Auto-increment rental ID counter   |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key               | Type           | Description                     |
//! |-------------------|----------------|---------------------------------|
//! | `RentConfig(id)`  | `RentalConfig` | Immutable booking terms         |
//! | `RentState(id)`   | `RentalState`  | Mutable status and interest     |
//!
//! Bookings write both entries once; return and settlement rewrite only the
//! small state entry.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Rental, RentalConfig, RentalState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All ledger storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract administrator (Instance).
    Admin,
    /// Vehicle catalog contract address (Instance).
    VehicleContract,
    /// Escrow/payout token address (Instance).
    PaymentToken,
    /// Global auto-increment rental ID counter (Instance).
    RentalCount,
    /// Immutable booking terms keyed by rental ID (Persistent).
    RentConfig(u64),
    /// Mutable rental state keyed by rental ID (Persistent).
    RentState(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_vehicle_contract(env: &Env, address: &Address) {
    env.storage().instance().set(&DataKey::VehicleContract, address);
    bump_instance(env);
}

pub fn get_vehicle_contract(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::VehicleContract)
}

pub fn set_payment_token(env: &Env, address: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, address);
    bump_instance(env);
}

pub fn get_payment_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::PaymentToken)
}

/// Atomically reads, increments, and stores the rental counter.
/// Returns the ID to use for the rental being created (pre-increment value).
pub fn next_rental_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::RentalCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::RentalCount, &(current + 1));
    current
}

/// Number of rentals ever created, closed records included.
pub fn rental_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::RentalCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both halves of a new rental.
pub fn save_rental(env: &Env, rental: &Rental) {
    let (config, state) = rental.clone().into_parts();
    let config_key = DataKey::RentConfig(config.rental_id);
    let state_key = DataKey::RentState(config.rental_id);

    env.storage().persistent().set(&config_key, &config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Rental` by combining config and state.
pub fn load_rental(env: &Env, id: u64) -> Option<Rental> {
    let config = load_rental_config(env, id)?;
    let state = load_rental_state(env, id)?;
    Some(Rental::from_parts(config, state))
}

/// Load only the immutable booking terms.
pub fn load_rental_config(env: &Env, id: u64) -> Option<RentalConfig> {
    let key = DataKey::RentConfig(id);
    let config: Option<RentalConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

/// Load only the mutable rental state.
pub fn load_rental_state(env: &Env, id: u64) -> Option<RentalState> {
    let key = DataKey::RentState(id);
    let state: Option<RentalState> = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

/// Save only the mutable rental state.
pub fn save_rental_state(env: &Env, id: u64, state: &RentalState) {
    let key = DataKey::RentState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}
