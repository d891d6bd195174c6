//! Event payloads published by the catalog.
//!
//! Topics are short symbols so the off-chain indexer can filter on them:
//! `minted` for vehicle tokens, `receipt` for rental receipt tokens.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Published when a vehicle token is minted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VehicleMinted {
    pub token_id: u64,
    pub owner: Address,
    pub price_per_day: i128,
    pub guarantee: i128,
}

/// Published when a rental receipt token is minted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptMinted {
    pub token_id: u64,
    pub to: Address,
}

pub fn vehicle_minted(env: &Env, token_id: u64, owner: &Address, price_per_day: i128, guarantee: i128) {
    env.events().publish(
        (symbol_short!("minted"), token_id),
        VehicleMinted {
            token_id,
            owner: owner.clone(),
            price_per_day,
            guarantee,
        },
    );
}

pub fn receipt_minted(env: &Env, token_id: u64, to: &Address) {
    env.events().publish(
        (symbol_short!("receipt"), token_id),
        ReceiptMinted {
            token_id,
            to: to.clone(),
        },
    );
}
