//! Event payloads published by the rental ledger.
//!
//! One short-symbol topic per lifecycle step: `created`, `returned`,
//! `refunded`. The off-chain indexer keys on these.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Published when a booking is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RentalCreated {
    pub rental_id: u64,
    pub token_id: u64,
    pub renter: Address,
    pub total_price: i128,
}

/// Published when a vehicle is returned and its interest is fixed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RentalReturned {
    pub rental_id: u64,
    pub token_id: u64,
    pub total_interest: i128,
}

/// Published when the guarantee is settled and paid out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuaranteeRefunded {
    pub rental_id: u64,
    pub renter: Address,
    pub payout: i128,
    pub interest: i128,
}

pub fn rental_created(env: &Env, rental_id: u64, token_id: u64, renter: &Address, total_price: i128) {
    env.events().publish(
        (symbol_short!("created"), rental_id),
        RentalCreated {
            rental_id,
            token_id,
            renter: renter.clone(),
            total_price,
        },
    );
}

pub fn rental_returned(env: &Env, rental_id: u64, token_id: u64, total_interest: i128) {
    env.events().publish(
        (symbol_short!("returned"), rental_id),
        RentalReturned {
            rental_id,
            token_id,
            total_interest,
        },
    );
}

pub fn guarantee_refunded(env: &Env, rental_id: u64, renter: &Address, payout: i128, interest: i128) {
    env.events().publish(
        (symbol_short!("refunded"), rental_id),
        GuaranteeRefunded {
            rental_id,
            renter: renter.clone(),
            payout,
            interest,
        },
    );
}
