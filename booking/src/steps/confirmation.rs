//! Step 4: receipt.
//!
//! Pure display of the stored [`Receipt`]. Building the view twice from the
//! same receipt yields the same reference and QR code.

use crate::config::QrConfig;
use crate::receipt::Receipt;
use crate::types::{Money, PaymentMethod, Quantity};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// View model of the confirmation step
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    /// Booking reference
    pub reference: String,
    /// QR-code image URL encoding the reference
    pub qr_code_url: String,
    /// Category bought
    pub category_name: String,
    /// Number of tickets
    pub quantity: Quantity,
    /// Buyer full name
    pub buyer_name: String,
    /// Buyer e-mail
    pub buyer_email: String,
    /// Operator debited
    pub method: PaymentMethod,
    /// Operator label
    pub method_label: &'static str,
    /// Subtotal
    pub subtotal: Money,
    /// Commission
    pub commission: Money,
    /// Amount charged
    pub total: Money,
    /// Gateway transaction id
    pub transaction_id: String,
    /// Payment time
    pub paid_at: DateTime<Utc>,
}

impl ConfirmationView {
    /// Builds the view from the receipt
    #[must_use]
    pub fn build(receipt: &Receipt, qr: &QrConfig) -> Self {
        Self {
            reference: receipt.reference.to_string(),
            qr_code_url: receipt.reference.qr_code_url(qr),
            category_name: receipt.category_name.clone(),
            quantity: receipt.pricing.quantity,
            buyer_name: receipt.buyer.full_name(),
            buyer_email: receipt.buyer.email.trim().to_string(),
            method: receipt.method,
            method_label: receipt.method.label(),
            subtotal: receipt.pricing.subtotal,
            commission: receipt.pricing.commission,
            total: receipt.pricing.total,
            transaction_id: receipt.transaction_id.clone(),
            paid_at: receipt.paid_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::PaymentConfirmation;
    use crate::pricing::{Pricing, DEFAULT_COMMISSION_BPS};
    use crate::receipt::BookingReference;
    use crate::steps::contact::ContactForm;
    use crate::types::TicketCategoryId;
    use event_place_core::environment::Clock;
    use event_place_testing::test_clock;

    fn receipt() -> Receipt {
        let pricing = Pricing::compute(Money::from_units(75), Quantity::clamped(2), DEFAULT_COMMISSION_BPS);
        Receipt::issue(
            BookingReference::new(2025, 4821),
            TicketCategoryId::new("cat1"),
            "Standard".to_string(),
            pricing,
            ContactForm {
                first_name: "Jean".to_string(),
                last_name: "Dupont".to_string(),
                email: " jean@exemple.fr ".to_string(),
            },
            PaymentConfirmation {
                transaction_id: "mock_txn_1".to_string(),
                method: PaymentMethod::Mtn,
                amount: pricing.total,
            },
            test_clock().now(),
        )
    }

    #[test]
    fn test_view_shows_receipt() {
        let view = ConfirmationView::build(&receipt(), &QrConfig::default());

        assert_eq!(view.reference, "EVT-2025-4821");
        assert!(view.qr_code_url.ends_with("data=EVT-2025-4821"));
        assert_eq!(view.buyer_name, "Jean Dupont");
        assert_eq!(view.buyer_email, "jean@exemple.fr");
        assert_eq!(view.method_label, "MTN MoMo");
        assert_eq!(view.total, Money::from_cents(15_750));
        assert_eq!(view.quantity.get(), 2);
    }

    #[test]
    fn test_rebuilding_keeps_reference() {
        let receipt = receipt();
        let qr = QrConfig::default();

        assert_eq!(ConfirmationView::build(&receipt, &qr), ConfirmationView::build(&receipt, &qr));
    }
}
