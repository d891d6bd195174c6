//! Canonical event types emitted by the rental protocol contracts.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/vehicle_nft/src/events.rs` and
//! `contracts/car_rental/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the two protocol contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A vehicle token was minted (`minted` topic, catalog contract).
    VehicleMinted,
    /// A rental receipt token was minted (`receipt` topic, catalog contract).
    ReceiptMinted,
    /// A booking was created (`created` topic, rental contract).
    RentalCreated,
    /// A vehicle was returned (`returned` topic, rental contract).
    RentalReturned,
    /// A guarantee was settled and paid out (`refunded` topic, rental contract).
    GuaranteeRefunded,
    /// An event from these contracts that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an
    /// [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "minted" => Self::VehicleMinted,
            "receipt" => Self::ReceiptMinted,
            "created" => Self::RentalCreated,
            "returned" => Self::RentalReturned,
            "refunded" => Self::GuaranteeRefunded,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VehicleMinted => "vehicle_minted",
            Self::ReceiptMinted => "receipt_minted",
            Self::RentalCreated => "rental_created",
            Self::RentalReturned => "rental_returned",
            Self::GuaranteeRefunded => "guarantee_refunded",
            Self::Unknown => "unknown",
        }
    }

    /// True for kinds whose topic subject is a rental id rather than a
    /// token id.
    pub fn subject_is_rental(&self) -> bool {
        matches!(
            self,
            Self::RentalCreated | Self::RentalReturned | Self::GuaranteeRefunded
        )
    }
}

/// A fully decoded protocol event, ready to be stored in the database.
///
/// `subject_id` is the second topic element: a rental id for rental-contract
/// events, a token id for catalog events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalEvent {
    pub event_type: String,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
