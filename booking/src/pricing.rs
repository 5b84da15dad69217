//! Booking price breakdown.
//!
//! The single place where a booking is priced. Views call it on every build and
//! the receipt freezes the value charged, so the two can never disagree.

use crate::types::{Money, Quantity};
use serde::{Deserialize, Serialize};

/// Basis points in 100 %
const BPS_SCALE: u128 = 10_000;

/// Commission applied by Event Place, 5 %
pub const DEFAULT_COMMISSION_BPS: u32 = 500;

/// Price breakdown for `quantity` tickets at `unit_price`
///
/// `subtotal = unit_price * quantity`, `commission = subtotal * rate` rounded
/// half-up to the cent, `total = subtotal + commission`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Price of one ticket
    pub unit_price: Money,
    /// Number of tickets
    pub quantity: Quantity,
    /// `unit_price * quantity`
    pub subtotal: Money,
    /// Service commission
    pub commission: Money,
    /// Amount charged
    pub total: Money,
}

impl Pricing {
    /// Prices a booking
    ///
    /// `commission_bps` is the commission rate in basis points (500 = 5 %).
    /// Arithmetic saturates instead of overflowing.
    #[must_use]
    pub fn compute(unit_price: Money, quantity: Quantity, commission_bps: u32) -> Self {
        let subtotal = unit_price.saturating_multiply(quantity.get());
        let commission = commission_on(subtotal, commission_bps);

        Self {
            unit_price,
            quantity,
            subtotal,
            commission,
            total: subtotal.saturating_add(commission),
        }
    }
}

/// `amount * bps / 10_000`, rounded half-up to the cent
fn commission_on(amount: Money, bps: u32) -> Money {
    let scaled = u128::from(amount.cents()) * u128::from(bps);
    let rounded = (scaled + BPS_SCALE / 2) / BPS_SCALE;
    Money::from_cents(u64::try_from(rounded).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standard_ticket_times_two() {
        let pricing = Pricing::compute(Money::from_units(75), Quantity::clamped(2), DEFAULT_COMMISSION_BPS);

        assert_eq!(pricing.subtotal, Money::from_units(150));
        assert_eq!(pricing.commission, Money::from_cents(750));
        assert_eq!(pricing.total, Money::from_cents(15_750));
        assert_eq!(pricing.total.format_units(), "157€");
    }

    #[test]
    fn test_commission_rounds_half_up_to_the_cent() {
        // 0.10€ * 5 % = 0.005€ -> 0.01€
        assert_eq!(commission_on(Money::from_cents(10), 500), Money::from_cents(1));
        // 0.09€ * 5 % = 0.0045€ -> 0.00€
        assert_eq!(commission_on(Money::from_cents(9), 500), Money::ZERO);
    }

    #[test]
    fn test_zero_rate_and_zero_price() {
        let free = Pricing::compute(Money::ZERO, Quantity::clamped(3), DEFAULT_COMMISSION_BPS);
        assert!(free.total.is_zero());

        let no_fee = Pricing::compute(Money::from_units(20), Quantity::clamped(3), 0);
        assert_eq!(no_fee.total, Money::from_units(60));
    }

    #[test]
    fn test_saturates_on_huge_prices() {
        let pricing = Pricing::compute(Money::from_cents(u64::MAX), Quantity::clamped(10), DEFAULT_COMMISSION_BPS);
        assert_eq!(pricing.total.cents(), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_breakdown_is_consistent(units in 0_u64..100_000, requested in 0_u32..50) {
            let quantity = Quantity::clamped(requested);
            let pricing = Pricing::compute(Money::from_units(units), quantity, DEFAULT_COMMISSION_BPS);

            prop_assert_eq!(pricing.subtotal.cents(), units * 100 * u64::from(quantity.get()));
            // Whole-euro subtotals make the 5 % commission exact
            prop_assert_eq!(pricing.commission.cents() * 20, pricing.subtotal.cents());
            prop_assert_eq!(pricing.total, pricing.subtotal.saturating_add(pricing.commission));
        }

        #[test]
        fn prop_commission_within_half_cent(cents in 0_u64..10_000_000, bps in 0_u32..10_000) {
            let exact = u128::from(cents) * u128::from(bps);
            let commission = u128::from(commission_on(Money::from_cents(cents), bps).cents());
            // |commission * 10_000 - exact| <= 5_000
            prop_assert!(commission * BPS_SCALE + BPS_SCALE / 2 >= exact);
            prop_assert!(commission * BPS_SCALE <= exact + BPS_SCALE / 2);
        }
    }
}
