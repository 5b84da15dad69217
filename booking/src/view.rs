//! Page-level view model.
//!
//! [`BookingView::build`] is the only place pricing is derived for display, so
//! the summary and the pay button always agree with the current selection.

use crate::config::BookingConfig;
use crate::pricing::Pricing;
use crate::reducer::BookingState;
use crate::steps::{ConfirmationView, ContactView, PaymentView, TicketsView};
use crate::types::{Money, Quantity, Step};
use serde::Serialize;

/// Label of the back button
pub const BACK_LABEL: &str = "Retour";
/// Label of the advance button on steps 1 and 2
pub const CONTINUE_LABEL: &str = "Continuer";
/// Label of the advance button while the gateway is working
pub const PROCESSING_LABEL: &str = "Traitement en cours...";

/// One entry of the progress indicator
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressItem {
    /// 1-based step number
    pub number: u8,
    /// Step title
    pub title: &'static str,
    /// Already passed
    pub done: bool,
    /// Currently shown
    pub current: bool,
}

/// Body of the current step
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum StepBody {
    /// Step 1
    Tickets(TicketsView),
    /// Step 2
    Contact(ContactView),
    /// Step 3
    Payment(PaymentView),
    /// Step 4
    Confirmation(ConfirmationView),
}

/// Order summary shown beside steps 1 to 3
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Selected category
    pub category_name: String,
    /// Price of one ticket
    pub unit_price: Money,
    /// Tickets ordered
    pub quantity: Quantity,
    /// `unit_price * quantity`
    pub subtotal: Money,
    /// Platform commission
    pub commission: Money,
    /// Amount to pay
    pub total: Money,
}

impl OrderSummary {
    fn new(category_name: String, pricing: Pricing) -> Self {
        Self {
            category_name,
            unit_price: pricing.unit_price,
            quantity: pricing.quantity,
            subtotal: pricing.subtotal,
            commission: pricing.commission,
            total: pricing.total,
        }
    }
}

/// A button
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Control {
    /// Button text
    pub label: String,
    /// Clickable
    pub enabled: bool,
}

/// Navigation buttons under the step body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// Shown on steps 2 and 3 while idle
    pub back: Option<Control>,
    /// Absent on the confirmation step
    pub advance: Option<Control>,
}

/// Everything the booking page renders
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingView {
    /// "Back to event" link
    pub event_link: String,
    /// Current step
    pub step: Step,
    /// 1-based number of the current step
    pub step_number: u8,
    /// Title of the current step
    pub step_title: &'static str,
    /// Progress indicator, one item per step
    pub progress: Vec<ProgressItem>,
    /// Content of the current step
    pub body: StepBody,
    /// `None` once confirmed, or when nothing can be selected
    pub summary: Option<OrderSummary>,
    /// Navigation buttons
    pub controls: Controls,
}

impl BookingView {
    /// Builds the page from the current state
    #[must_use]
    pub fn build(state: &BookingState, config: &BookingConfig) -> Self {
        let pricing = state.pricing(config.commission_bps);

        let body = match (state.step, &state.receipt) {
            (Step::Tickets, _) => StepBody::Tickets(TicketsView::build(&state.tickets)),
            (Step::Contact, _) => StepBody::Contact(ContactView::build(&state.contact)),
            (Step::Confirmation, Some(receipt)) => {
                StepBody::Confirmation(ConfirmationView::build(receipt, &config.qr))
            },
            // The confirmation step is only entered with a receipt
            (Step::Payment | Step::Confirmation, _) => StepBody::Payment(PaymentView::build(&state.payment)),
        };

        let summary = match state.step {
            Step::Confirmation => None,
            _ => state
                .selected_category()
                .zip(pricing)
                .map(|(category, pricing)| OrderSummary::new(category.name.clone(), pricing)),
        };

        let progress = Step::ALL
            .into_iter()
            .map(|step| ProgressItem {
                number: step.number(),
                title: step.title(),
                done: step < state.step,
                current: step == state.step,
            })
            .collect();

        Self {
            event_link: format!("/events/{}", state.event_id),
            step: state.step,
            step_number: state.step.number(),
            step_title: state.step.title(),
            progress,
            body,
            summary,
            controls: Self::controls(state, pricing),
        }
    }

    fn controls(state: &BookingState, pricing: Option<Pricing>) -> Controls {
        let processing = state.is_processing();

        let back = state.step.previous().filter(|_| !processing).map(|_| Control {
            label: BACK_LABEL.to_string(),
            enabled: true,
        });

        let advance = match state.step {
            Step::Tickets => Some(Control {
                label: CONTINUE_LABEL.to_string(),
                enabled: state.tickets.is_complete(),
            }),
            Step::Contact => Some(Control {
                label: CONTINUE_LABEL.to_string(),
                enabled: true,
            }),
            Step::Payment if processing => Some(Control {
                label: PROCESSING_LABEL.to_string(),
                enabled: false,
            }),
            Step::Payment => Some(Control {
                label: pricing.map_or_else(
                    || "Payer".to_string(),
                    |pricing| format!("Payer {}", pricing.total.format_units()),
                ),
                enabled: pricing.is_some(),
            }),
            Step::Confirmation => None,
        };

        Controls { back, advance }
    }
}
