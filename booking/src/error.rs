//! Error types for the booking crate.

use crate::types::TicketCategoryId;
use thiserror::Error;

/// Errors raised while building a ticket catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no category at all
    #[error("catalog must contain at least one category")]
    Empty,

    /// A category advertises more remaining seats than it has in total
    #[error("category {id}: {available} available exceeds {total} total")]
    AvailabilityExceedsTotal {
        /// Offending category
        id: TicketCategoryId,
        /// Remaining seats
        available: u32,
        /// Total seats
        total: u32,
    },

    /// Two categories share an id
    #[error("duplicate category id {0}")]
    DuplicateCategory(TicketCategoryId),
}

/// Errors returned by a payment gateway
///
/// Cloneable so the outcome can travel inside a `BookingAction`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The operator refused the payment
    #[error("Paiement refusé : {reason}")]
    Declined {
        /// Reason given by the operator
        reason: String,
    },

    /// The operator could not be reached
    #[error("Service de paiement indisponible : {message}")]
    Unavailable {
        /// Transport-level description
        message: String,
    },
}

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        /// Environment variable name
        var: &'static str,
        /// Raw value found
        value: String,
        /// Why it was rejected
        reason: String,
    },
}
