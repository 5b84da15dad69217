//! Domain types for the booking wizard.
//!
//! Value objects shared by every step: identifiers, money, the clamped ticket
//! quantity, payment methods, the wizard steps and per-form error maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a ticket category in the catalog (`cat1`, `cat2`, ...)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketCategoryId(String);

impl TicketCategoryId {
    /// Creates a category id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the event the wizard was opened for
///
/// Only used to build the link back to the event page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Creates an event id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one payment submission
///
/// A result is only committed if its id matches the submission still in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(u64);

impl SubmissionId {
    /// Creates a submission id
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission-{}", self.0)
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Represents money in cents to avoid floating-point arithmetic errors
///
/// Amounts are euros. `Display` prints `157.50€`, or `75€` for whole amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero euros
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole euros, saturating on overflow
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns the amount in whole euros (rounded down)
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0 / 100
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, saturating on overflow
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies by a quantity, saturating on overflow
    #[must_use]
    pub const fn saturating_multiply(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Formats the amount in whole euros, dropping the cents (`157€`)
    #[must_use]
    pub fn format_units(&self) -> String {
        format!("{}€", self.units())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "{}€", self.units())
        } else {
            write!(f, "{}.{cents:02}€", self.units())
        }
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// Number of tickets in a booking, always within `[1, 10]`
///
/// Every constructor clamps, deserialization included; out-of-range requests
/// are never rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest allowed quantity
    pub const MIN: u32 = 1;
    /// Largest allowed quantity
    pub const MAX: u32 = 10;

    /// Creates a quantity, clamping `requested` into `[MIN, MAX]`
    #[must_use]
    pub const fn clamped(requested: u32) -> Self {
        if requested < Self::MIN {
            Self(Self::MIN)
        } else if requested > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(requested)
        }
    }

    /// Returns the raw count
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more ticket, clamped
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self::clamped(self.0.saturating_add(1))
    }

    /// One ticket fewer, clamped
    #[must_use]
    pub const fn decremented(self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }

    /// Whether the stepper can still go down
    #[must_use]
    pub const fn can_decrement(self) -> bool {
        self.0 > Self::MIN
    }

    /// Whether the stepper can still go up
    #[must_use]
    pub const fn can_increment(self) -> bool {
        self.0 < Self::MAX
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u32> for Quantity {
    fn from(requested: u32) -> Self {
        Self::clamped(requested)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Payment method
// ============================================================================

/// Mobile-money operator used to pay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Moov Money
    #[default]
    Moov,
    /// MTN Mobile Money
    Mtn,
    /// Celtiis Cash
    Celtis,
}

impl PaymentMethod {
    /// Every method, in display order
    pub const ALL: [Self; 3] = [Self::Moov, Self::Mtn, Self::Celtis];

    /// Label shown on the selector
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Moov => "Moov Money",
            Self::Mtn => "MTN MoMo",
            Self::Celtis => "Celtiis Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Steps
// ============================================================================

/// The four wizard steps, in order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Ticket category and quantity
    #[default]
    Tickets,
    /// Buyer identity
    Contact,
    /// Mobile-money payment
    Payment,
    /// Receipt (terminal)
    Confirmation,
}

impl Step {
    /// All steps, in order
    pub const ALL: [Self; 4] = [Self::Tickets, Self::Contact, Self::Payment, Self::Confirmation];

    /// 1-based position shown in the progress header
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Tickets => 1,
            Self::Contact => 2,
            Self::Payment => 3,
            Self::Confirmation => 4,
        }
    }

    /// Title shown in the progress header
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Tickets => "Billets",
            Self::Contact => "Coordonnées",
            Self::Payment => "Paiement",
            Self::Confirmation => "Confirmation",
        }
    }

    /// The step after this one, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Tickets => Some(Self::Contact),
            Self::Contact => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// The step reached by going back, only from Contact and Payment
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Contact => Some(Self::Tickets),
            Self::Payment => Some(Self::Contact),
            Self::Tickets | Self::Confirmation => None,
        }
    }
}

// ============================================================================
// Form fields and validation errors
// ============================================================================

/// Fields of the contact form
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// E-mail address
    Email,
}

impl ContactField {
    /// Fields in display order
    pub const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Input label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "Prénom",
            Self::LastName => "Nom",
            Self::Email => "E-mail",
        }
    }
}

/// Fields of the payment form
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    /// Mobile-money number
    Number,
}

/// Validation messages keyed by field
///
/// Replaced wholesale on every validation pass, never merged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord>(BTreeMap<F, String>);

impl<F: Ord> FieldErrors<F> {
    /// An empty error map
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records a message for a field
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for a field, if any
    #[must_use]
    pub fn get(&self, field: &F) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when no field is in error
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in error
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&F, &str)> {
        self.0.iter().map(|(field, message)| (field, message.as_str()))
    }
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}
