//! # Types
//!
//! Data structures for the rental ledger.
//!
//! ## Config / State split
//!
//! A rental is internally stored as two separate ledger entries:
//!
//! - [`RentalConfig`] is written once at booking and never mutated. The
//!   price is snapshotted from the vehicle terms at that moment, so later
//!   term changes can never affect an open rental.
//! - [`RentalState`] is the small mutable entry rewritten on return and
//!   settlement.
//!
//! ## Status as a Finite-State Machine
//!
//! [`RentalStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Active ──► Returned ──► Settled
//! ```
//!
//! No stage is skipped and no transition is reversible. Records are never
//! deleted; a settled rental remains queryable as a closed record.

use soroban_sdk::{contracttype, Address};

/// Lifecycle status of a rental.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RentalStatus {
    /// Booked; the vehicle is out and the escrow is held.
    Active,
    /// Vehicle returned; interest fixed, guarantee not yet settled.
    Returned,
    /// Guarantee settled and paid out. Terminal.
    Settled,
}

/// Immutable rental terms, written once at booking.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RentalConfig {
    pub rental_id: u64,
    /// Vehicle token in the catalog contract. The ledger does not own the
    /// vehicle lifetime; this is a plain reference.
    pub token_id: u64,
    /// Booking party; receives the guarantee payout at settlement.
    pub renter: Address,
    /// Rental window, unix seconds. `end_date > start_date` always holds.
    pub start_date: u64,
    pub end_date: u64,
    /// Billable days: ceiling of the window in days, minimum one.
    pub total_days: u64,
    /// `total_days * price_per_day`, snapshotted at booking.
    pub total_price: i128,
    /// Receipt token minted to the renter in the catalog contract.
    pub receipt_token_id: u64,
}

/// Mutable rental state, updated on return and settlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RentalState {
    pub status: RentalStatus,
    /// Late-return interest. Zero until the return fixes it.
    pub total_interest: i128,
}

/// Full rental record as returned by the public API.
///
/// Reconstructed from the split [`RentalConfig`] + [`RentalState`] storage
/// entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rental {
    pub rental_id: u64,
    pub token_id: u64,
    pub renter: Address,
    pub start_date: u64,
    pub end_date: u64,
    pub total_days: u64,
    pub total_price: i128,
    pub total_interest: i128,
    pub receipt_token_id: u64,
    pub status: RentalStatus,
}

impl Rental {
    /// True from booking until the return succeeds.
    pub fn active(&self) -> bool {
        self.status == RentalStatus::Active
    }

    /// True once the vehicle has been returned, settled or not.
    pub fn returned(&self) -> bool {
        matches!(self.status, RentalStatus::Returned | RentalStatus::Settled)
    }

    /// True once the guarantee payout has been executed.
    pub fn guarantee_refunded(&self) -> bool {
        self.status == RentalStatus::Settled
    }

    /// Split a full record into its storage halves.
    pub fn into_parts(self) -> (RentalConfig, RentalState) {
        (
            RentalConfig {
                rental_id: self.rental_id,
                token_id: self.token_id,
                renter: self.renter,
                start_date: self.start_date,
                end_date: self.end_date,
                total_days: self.total_days,
                total_price: self.total_price,
                receipt_token_id: self.receipt_token_id,
            },
            RentalState {
                status: self.status,
                total_interest: self.total_interest,
            },
        )
    }

    /// Rebuild a full record from its storage halves.
    pub fn from_parts(config: RentalConfig, state: RentalState) -> Self {
        Rental {
            rental_id: config.rental_id,
            token_id: config.token_id,
            renter: config.renter,
            start_date: config.start_date,
            end_date: config.end_date,
            total_days: config.total_days,
            total_price: config.total_price,
            total_interest: state.total_interest,
            receipt_token_id: config.receipt_token_id,
            status: state.status,
        }
    }
}
