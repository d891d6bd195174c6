//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the catalog:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                         |
//! |------------------|-----------|-------------------------------------|
//! | `Admin`          | `Address` | Contract administrator              |
//! | `RentalContract` | `Address` | Authorized rental contract          |
//! | `TokenCount`     | `u64`     | Auto-increment token ID counter     |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key              | Type            | Description                    |
//! |------------------|-----------------|--------------------------------|
//! | `VehConfig(id)`  | `VehicleConfig` | Immutable vehicle terms        |
//! | `VehState(id)`   | `VehicleState`  | Mutable availability flags     |
//! | `VehicleIds`     | `Vec<u64>`      | Vehicle ids in mint order      |
//! | `TokenOwner(id)` | `Address`       | Owner of a token               |
//! | `OwnerCount(a)`  | `u32`           | Number of tokens held by `a`   |
//!
//! The token counter is shared between vehicle tokens and rental receipt
//! tokens, so receipt ids interleave with vehicle ids. `VehicleIds` only
//! lists ids that carry a vehicle record.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Vehicle, VehicleConfig, VehicleState};

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

/// All catalog storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract administrator (Instance).
    Admin,
    /// Rental contract allowed to mutate availability flags (Instance).
    RentalContract,
    /// Global auto-increment token ID counter (Instance).
    TokenCount,
    /// Immutable vehicle terms keyed by token ID (Persistent).
    VehConfig(u64),
    /// Mutable availability flags keyed by token ID (Persistent).
    VehState(u64),
    /// Token ids carrying a vehicle record, in mint order (Persistent).
    VehicleIds,
    /// Owner of a token, vehicle or receipt (Persistent).
    TokenOwner(u64),
    /// Number of tokens held by an address (Persistent).
    OwnerCount(Address),
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

pub fn set_rental_contract(env: &Env, rental: &Address) {
    env.storage().instance().set(&DataKey::RentalContract, rental);
    bump_instance(env);
}

pub fn get_rental_contract(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::RentalContract)
}

/// Atomically reads, increments, and stores the token counter.
/// Returns the ID to use for the token being minted (pre-increment value).
pub fn next_token_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::TokenCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::TokenCount, &(current + 1));
    current
}

/// Total number of tokens minted so far (vehicles and receipts).
pub fn token_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TokenCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both halves of a new vehicle and append its id to the mint-order
/// index.
pub fn save_vehicle(env: &Env, vehicle: &Vehicle) {
    let (config, state) = vehicle.clone().into_parts();
    let config_key = DataKey::VehConfig(config.token_id);
    let state_key = DataKey::VehState(config.token_id);

    let mut ids = vehicle_ids(env);
    ids.push_back(config.token_id);

    env.storage().persistent().set(&config_key, &config);
    env.storage().persistent().set(&state_key, &state);
    env.storage().persistent().set(&DataKey::VehicleIds, &ids);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
    bump_persistent(env, &DataKey::VehicleIds);
}

/// Load the full `Vehicle` by combining config and state.
pub fn load_vehicle(env: &Env, id: u64) -> Option<Vehicle> {
    let config = load_vehicle_config(env, id)?;
    let state = load_vehicle_state(env, id)?;
    Some(Vehicle::from_parts(config, state))
}

/// Load only the immutable vehicle terms.
pub fn load_vehicle_config(env: &Env, id: u64) -> Option<VehicleConfig> {
    let key = DataKey::VehConfig(id);
    let config: Option<VehicleConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

/// Load only the mutable availability flags.
pub fn load_vehicle_state(env: &Env, id: u64) -> Option<VehicleState> {
    let key = DataKey::VehState(id);
    let state: Option<VehicleState> = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

/// Save only the mutable availability flags.
pub fn save_vehicle_state(env: &Env, id: u64, state: &VehicleState) {
    let key = DataKey::VehState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn has_vehicle(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::VehConfig(id))
}

/// Token ids carrying a vehicle record, in mint order.
pub fn vehicle_ids(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::VehicleIds)
        .unwrap_or_else(|| Vec::new(env))
}

/// Record `owner` as the holder of `id` and bump their balance.
///
/// Tokens are never transferred or burned by this contract, so ownership
/// is written exactly once per token.
pub fn set_token_owner(env: &Env, id: u64, owner: &Address) {
    let key = DataKey::TokenOwner(id);
    env.storage().persistent().set(&key, owner);
    bump_persistent(env, &key);

    let count_key = DataKey::OwnerCount(owner.clone());
    let count: u32 = env.storage().persistent().get(&count_key).unwrap_or(0);
    env.storage().persistent().set(&count_key, &(count + 1));
    bump_persistent(env, &count_key);
}

pub fn token_owner(env: &Env, id: u64) -> Option<Address> {
    let key = DataKey::TokenOwner(id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    if owner.is_some() {
        bump_persistent(env, &key);
    }
    owner
}

pub fn owner_count(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerCount(owner.clone()))
        .unwrap_or(0)
}
