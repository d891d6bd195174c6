//! # Types
//!
//! Data structures for the vehicle catalog.
//!
//! ## Config / State split
//!
//! A vehicle is internally stored as two separate ledger entries:
//!
//! - [`VehicleConfig`] contains the rental terms, written once at mint time
//!   and never mutated.
//! - [`VehicleState`] contains the availability flags, rewritten by the
//!   rental contract on every booking, return and settlement.
//!
//! The public API exposes the reconstructed [`Vehicle`] struct for
//! convenience. Keeping the mutable entry tiny (two booleans) means the
//! frequent flag flips never rewrite the descriptive strings.

use soroban_sdk::{contracttype, String};

/// Immutable vehicle terms, written once when the token is minted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VehicleConfig {
    pub token_id: u64,
    /// Display name of the vehicle. Required to be non-empty.
    pub name: String,
    /// URI of the vehicle image. Opaque to the contract.
    pub image_uri: String,
    /// Free-form feature description. Opaque to the contract.
    pub features: String,
    /// Registration plate. Required to be non-empty.
    pub license_plate: String,
    /// Rental price per day, in the smallest unit of the payment token.
    pub price_per_day: i128,
    /// Security deposit escrowed for the duration of a rental.
    pub guarantee: i128,
    /// Percentage points of the guarantee charged per day of late return.
    pub late_interest_rate: u32,
}

/// Mutable availability flags, updated only by the rental contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VehicleState {
    /// True while an active rental references this token.
    pub rented: bool,
    /// True between a return and its guarantee settlement.
    pub pending_settlement: bool,
}

/// Full vehicle record as returned by the public API.
///
/// Reconstructed from the split [`VehicleConfig`] + [`VehicleState`]
/// storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vehicle {
    pub token_id: u64,
    pub name: String,
    pub image_uri: String,
    pub features: String,
    pub license_plate: String,
    pub price_per_day: i128,
    pub guarantee: i128,
    pub late_interest_rate: u32,
    pub rented: bool,
    pub pending_settlement: bool,
}

impl Vehicle {
    /// Split a full record into its storage halves.
    pub fn into_parts(self) -> (VehicleConfig, VehicleState) {
        (
            VehicleConfig {
                token_id: self.token_id,
                name: self.name,
                image_uri: self.image_uri,
                features: self.features,
                license_plate: self.license_plate,
                price_per_day: self.price_per_day,
                guarantee: self.guarantee,
                late_interest_rate: self.late_interest_rate,
            },
            VehicleState {
                rented: self.rented,
                pending_settlement: self.pending_settlement,
            },
        )
    }

    /// Rebuild a full record from its storage halves.
    pub fn from_parts(config: VehicleConfig, state: VehicleState) -> Self {
        Vehicle {
            token_id: config.token_id,
            name: config.name,
            image_uri: config.image_uri,
            features: config.features,
            license_plate: config.license_plate,
            price_per_day: config.price_per_day,
            guarantee: config.guarantee,
            late_interest_rate: config.late_interest_rate,
            rented: state.rented,
            pending_settlement: state.pending_settlement,
        }
    }
}
