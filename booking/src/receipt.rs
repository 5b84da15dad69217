//! Booking receipts and references.
//!
//! A receipt is produced once, when the gateway confirms a payment, and kept
//! in state. Rebuilding the confirmation view never changes its reference.

use crate::config::QrConfig;
use crate::gateway::PaymentConfirmation;
use crate::pricing::Pricing;
use crate::steps::contact::ContactForm;
use crate::types::{Money, PaymentMethod, TicketCategoryId};
use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable booking reference, `EVT-<year>-<4 digits>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    /// Largest number that still fits the four-digit suffix
    pub const MAX_NUMBER: u16 = 9999;

    /// Builds `EVT-<year>-<number>`, the number zero-padded to four digits
    ///
    /// Only the last four digits of `number` are kept.
    #[must_use]
    pub fn new(year: i32, number: u16) -> Self {
        let number = number % (Self::MAX_NUMBER + 1);
        Self(format!("EVT-{year}-{number:04}"))
    }

    /// Returns the reference as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of a QR-code image encoding this reference
    #[must_use]
    pub fn qr_code_url(&self, qr: &QrConfig) -> String {
        format!(
            "{}?size={size}x{size}&data={}",
            qr.endpoint,
            urlencoding::encode(&self.0),
            size = qr.size
        )
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of booking references
///
/// Injected through the environment so tests can predict references.
pub trait ReferenceGenerator: Send + Sync {
    /// A reference for a booking paid at `now`
    fn generate(&self, now: DateTime<Utc>) -> BookingReference;
}

/// Random four-digit references in `1000..=9999`
///
/// Not guaranteed unique; collisions are acceptable for a display reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomReferenceGenerator;

impl ReferenceGenerator for RandomReferenceGenerator {
    fn generate(&self, now: DateTime<Utc>) -> BookingReference {
        let number = rand::thread_rng().gen_range(1000..=9999);
        BookingReference::new(now.year(), number)
    }
}

/// Everything shown on the confirmation step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Booking reference
    pub reference: BookingReference,
    /// Category bought
    pub category_id: TicketCategoryId,
    /// Category name at the time of purchase
    pub category_name: String,
    /// Price breakdown of the order
    pub pricing: Pricing,
    /// Amount the gateway reports as debited
    pub charged: Money,
    /// Buyer identity
    pub buyer: ContactForm,
    /// Operator debited
    pub method: PaymentMethod,
    /// Gateway transaction id
    pub transaction_id: String,
    /// When the payment was confirmed
    pub paid_at: DateTime<Utc>,
}

impl Receipt {
    /// Assembles a receipt from a confirmed payment
    #[must_use]
    pub fn issue(
        reference: BookingReference,
        category_id: TicketCategoryId,
        category_name: String,
        pricing: Pricing,
        buyer: ContactForm,
        confirmation: PaymentConfirmation,
        paid_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reference,
            category_id,
            category_name,
            pricing,
            buyer,
            charged: confirmation.amount,
            method: confirmation.method,
            transaction_id: confirmation.transaction_id,
            paid_at,
        }
    }
}
