//! Booking orchestrator.
//!
//! Owns every piece of wizard state and drives the step machine
//! `Tickets -> Contact -> Payment -> Confirmation`. Step inputs are handled by
//! the child reducers in [`crate::steps`], scoped onto their slice of
//! [`BookingState`]; everything that crosses step boundaries is decided here:
//!
//! - validation when the buyer tries to advance
//! - the payment submission and its outcome
//! - backward navigation
//! - teardown, which cancels an in-flight submission
//!
//! A submission is identified by a [`SubmissionId`]. Its outcome is committed
//! only while the page is mounted and the id still matches the in-flight
//! submission; anything else is logged and dropped.

use crate::catalog::{Catalog, TicketCategory};
use crate::config::BookingConfig;
use crate::error::PaymentError;
use crate::gateway::{PaymentConfirmation, PaymentGateway, PaymentRequest};
use crate::navigation::Navigator;
use crate::pricing::Pricing;
use crate::receipt::{Receipt, ReferenceGenerator};
use crate::steps::contact::{ContactAction, ContactReducer, ContactState};
use crate::steps::payment::{PaymentAction, PaymentReducer, PaymentState};
use crate::steps::tickets::{TicketsAction, TicketsReducer, TicketsState};
use crate::types::{EventId, Step, SubmissionId, TicketCategoryId};
use crate::validation::{normalize_number, validate_contact, validate_payment};
use event_place_core::composition::{scope_reducer, ScopedReducer};
use event_place_core::environment::Clock;
use event_place_core::{async_effect, effect::Effect, fire_and_forget, reducer::Reducer, smallvec, SmallVec};
use event_place_macros::Action;
use std::sync::Arc;

/// Payments handed to the gateway
pub const PAYMENTS_SUBMITTED: &str = "booking.payments.submitted";
/// Payments confirmed and turned into a receipt
pub const PAYMENTS_CONFIRMED: &str = "booking.payments.confirmed";
/// Payments refused by the gateway
pub const PAYMENTS_FAILED: &str = "booking.payments.failed";
/// Gateway outcomes dropped because they were stale or the page was gone
pub const PAYMENTS_DISCARDED: &str = "booking.payments.discarded";
/// Confirmations whose debited amount differs from the order total
pub const PAYMENTS_AMOUNT_MISMATCH: &str = "booking.payments.amount_mismatch";

// ============================================================================
// State
// ============================================================================

/// Complete wizard state
#[derive(Clone, Debug)]
pub struct BookingState {
    /// Event the wizard was opened for
    pub event_id: EventId,
    /// Current step
    pub step: Step,
    /// Step 1 slice
    pub tickets: TicketsState,
    /// Step 2 slice
    pub contact: ContactState,
    /// Step 3 slice
    pub payment: PaymentState,
    /// Set once, when a payment is confirmed
    pub receipt: Option<Receipt>,
    /// False once the page has been torn down
    pub mounted: bool,
    /// Submissions issued so far
    submissions: u64,
}

impl BookingState {
    /// Fresh wizard on step 1
    ///
    /// `preferred` pre-selects a category when it is still available.
    #[must_use]
    pub fn new(event_id: EventId, catalog: Catalog, preferred: Option<&TicketCategoryId>) -> Self {
        Self {
            event_id,
            step: Step::Tickets,
            tickets: TicketsState::new(catalog, preferred),
            contact: ContactState::default(),
            payment: PaymentState::default(),
            receipt: None,
            mounted: true,
            submissions: 0,
        }
    }

    /// Category currently selected
    #[must_use]
    pub fn selected_category(&self) -> Option<&TicketCategory> {
        self.tickets
            .selection
            .category
            .as_ref()
            .and_then(|id| self.tickets.catalog.get(id))
    }

    /// Price of the current selection, derived on every call
    #[must_use]
    pub fn pricing(&self, commission_bps: u32) -> Option<Pricing> {
        self.selected_category().map(|category| {
            Pricing::compute(category.price, self.tickets.selection.quantity, commission_bps)
        })
    }

    /// Waiting for the gateway
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.payment.is_processing()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Everything that can happen to the wizard
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum BookingAction {
    /// Input on the ticket step
    #[intent]
    Tickets(TicketsAction),

    /// Input on the contact step
    #[intent]
    Contact(ContactAction),

    /// Input on the payment step
    #[intent]
    Payment(PaymentAction),

    /// "Continuer" / "Payer" button
    #[intent]
    Advance,

    /// "Retour" button
    #[intent]
    Retreat,

    /// The page is being torn down
    #[intent]
    Dismount,

    /// The gateway confirmed a submission
    #[outcome]
    PaymentSucceeded {
        /// Submission confirmed
        submission: SubmissionId,
        /// Gateway answer
        confirmation: PaymentConfirmation,
    },

    /// The gateway refused a submission
    #[outcome]
    PaymentFailed {
        /// Submission refused
        submission: SubmissionId,
        /// Why
        error: PaymentError,
    },
}

impl BookingAction {
    fn into_tickets(self) -> Option<TicketsAction> {
        match self {
            Self::Tickets(inner) => Some(inner),
            _ => None,
        }
    }

    fn into_contact(self) -> Option<ContactAction> {
        match self {
            Self::Contact(inner) => Some(inner),
            _ => None,
        }
    }

    fn into_payment(self) -> Option<PaymentAction> {
        match self {
            Self::Payment(inner) => Some(inner),
            _ => None,
        }
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the booking wizard
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for payment timestamps and reference years
    pub clock: Arc<dyn Clock>,
    /// Mobile-money gateway
    pub gateway: Arc<dyn PaymentGateway>,
    /// Source of booking references
    pub references: Arc<dyn ReferenceGenerator>,
    /// Hosting page
    pub navigator: Arc<dyn Navigator>,
    /// Pricing and display settings
    pub config: BookingConfig,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn PaymentGateway>,
        references: Arc<dyn ReferenceGenerator>,
        navigator: Arc<dyn Navigator>,
        config: BookingConfig,
    ) -> Self {
        Self {
            clock,
            gateway,
            references,
            navigator,
            config,
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

type Scoped<R> = ScopedReducer<BookingState, BookingAction, BookingEnvironment, R>;

/// Reducer for the booking wizard
pub struct BookingReducer {
    tickets: Scoped<TicketsReducer>,
    contact: Scoped<ContactReducer>,
    payment: Scoped<PaymentReducer>,
}

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            tickets: scope_reducer(
                TicketsReducer,
                |state: &mut BookingState| &mut state.tickets,
                |_env: &BookingEnvironment| &(),
                BookingAction::into_tickets,
                BookingAction::Tickets,
            ),
            contact: scope_reducer(
                ContactReducer,
                |state: &mut BookingState| &mut state.contact,
                |_env: &BookingEnvironment| &(),
                BookingAction::into_contact,
                BookingAction::Contact,
            ),
            payment: scope_reducer(
                PaymentReducer,
                |state: &mut BookingState| &mut state.payment,
                |_env: &BookingEnvironment| &(),
                BookingAction::into_payment,
                BookingAction::Payment,
            ),
        }
    }

    /// Forwards step input to its child reducer, only while that step is shown
    fn on_step<R>(
        step: Step,
        child: &Scoped<R>,
        state: &mut BookingState,
        action: BookingAction,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<BookingAction>; 4]>
    where
        R: Reducer<Environment = ()>,
        R::Action: Send + 'static,
    {
        if state.step != step {
            tracing::debug!(action = action.name(), current = ?state.step, "Ignored input for a hidden step");
            return SmallVec::new();
        }
        child.reduce(state, action, env)
    }

    /// Moves to `step` and asks the page to scroll up
    fn go_to(
        state: &mut BookingState,
        step: Step,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        tracing::debug!(from = ?state.step, to = ?step, "Step changed");
        state.step = step;

        let navigator = Arc::clone(&env.navigator);
        smallvec![fire_and_forget! {
            navigator.scroll_to_top();
        }]
    }

    fn advance(state: &mut BookingState, env: &BookingEnvironment) -> SmallVec<[Effect<BookingAction>; 4]> {
        match state.step {
            Step::Tickets => {
                if !state.tickets.is_complete() {
                    tracing::debug!("Advance blocked: no ticket category selected");
                    return SmallVec::new();
                }
                Self::go_to(state, Step::Contact, env)
            },
            Step::Contact => {
                state.contact.errors = validate_contact(&state.contact.form);
                if !state.contact.errors.is_empty() {
                    tracing::debug!(errors = state.contact.errors.len(), "Contact form rejected");
                    return smallvec![Effect::None];
                }
                Self::go_to(state, Step::Payment, env)
            },
            Step::Payment => Self::submit_payment(state, env),
            Step::Confirmation => SmallVec::new(),
        }
    }

    fn submit_payment(state: &mut BookingState, env: &BookingEnvironment) -> SmallVec<[Effect<BookingAction>; 4]> {
        if state.is_processing() {
            tracing::debug!("Advance ignored: payment already in flight");
            return SmallVec::new();
        }

        state.payment.errors = validate_payment(&state.payment.form);
        if !state.payment.errors.is_empty() {
            tracing::debug!("Payment form rejected");
            return smallvec![Effect::None];
        }

        let Some(pricing) = state.pricing(env.config.commission_bps) else {
            tracing::warn!("Payment attempted without a ticket category");
            return SmallVec::new();
        };

        state.submissions += 1;
        let submission = SubmissionId::new(state.submissions);
        state.payment.in_flight = Some(submission);
        state.payment.submission_error = None;

        let request = PaymentRequest {
            submission,
            method: state.payment.form.method,
            number: normalize_number(&state.payment.form.number),
            amount: pricing.total,
        };

        tracing::info!(
            %submission,
            method = %request.method,
            amount = request.amount.cents(),
            "Payment submitted"
        );
        metrics::counter!(PAYMENTS_SUBMITTED).increment(1);

        let gateway = Arc::clone(&env.gateway);
        smallvec![async_effect! {
            Some(match gateway.submit(request).await {
                Ok(confirmation) => BookingAction::PaymentSucceeded { submission, confirmation },
                Err(error) => BookingAction::PaymentFailed { submission, error },
            })
        }]
    }

    /// True when `submission` is the one the wizard is waiting for
    fn is_current(state: &BookingState, submission: SubmissionId) -> bool {
        if state.payment.in_flight == Some(submission) {
            return true;
        }
        tracing::warn!(%submission, in_flight = ?state.payment.in_flight, "Discarded stale payment result");
        metrics::counter!(PAYMENTS_DISCARDED).increment(1);
        false
    }

    fn confirm(
        state: &mut BookingState,
        submission: SubmissionId,
        confirmation: PaymentConfirmation,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        if !Self::is_current(state, submission) {
            return SmallVec::new();
        }
        state.payment.in_flight = None;

        let Some(category) = state.selected_category().cloned() else {
            tracing::warn!(%submission, "Confirmed payment lost its ticket category");
            state.payment.submission_error = Some("Catégorie de billet introuvable".to_string());
            return smallvec![Effect::None];
        };

        let pricing = Pricing::compute(
            category.price,
            state.tickets.selection.quantity,
            env.config.commission_bps,
        );
        if pricing.total != confirmation.amount {
            tracing::warn!(
                %submission,
                expected = pricing.total.cents(),
                charged = confirmation.amount.cents(),
                "Gateway debited a different amount than the order total"
            );
            metrics::counter!(PAYMENTS_AMOUNT_MISMATCH).increment(1);
        }

        let paid_at = env.clock.now();
        let reference = env.references.generate(paid_at);

        tracing::info!(
            %submission,
            reference = %reference,
            transaction_id = %confirmation.transaction_id,
            "Payment confirmed"
        );
        metrics::counter!(PAYMENTS_CONFIRMED).increment(1);

        state.receipt = Some(Receipt::issue(
            reference,
            category.id,
            category.name,
            pricing,
            state.contact.form.clone(),
            confirmation,
            paid_at,
        ));

        Self::go_to(state, Step::Confirmation, env)
    }

    fn fail(
        state: &mut BookingState,
        submission: SubmissionId,
        error: &PaymentError,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        if !Self::is_current(state, submission) {
            return SmallVec::new();
        }
        state.payment.in_flight = None;

        tracing::warn!(%submission, error = %error, "Payment failed");
        metrics::counter!(PAYMENTS_FAILED).increment(1);

        state.payment.submission_error = Some(error.to_string());
        smallvec![Effect::None]
    }
}

impl Default for BookingReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BookingReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingReducer").finish_non_exhaustive()
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if !state.mounted {
            if action.is_outcome() {
                tracing::warn!(action = action.name(), "Discarded payment result after dismount");
                metrics::counter!(PAYMENTS_DISCARDED).increment(1);
            } else {
                tracing::debug!(action = action.name(), "Ignored action after dismount");
            }
            return SmallVec::new();
        }

        match action {
            BookingAction::Tickets(_) => Self::on_step(Step::Tickets, &self.tickets, state, action, env),
            BookingAction::Contact(_) => Self::on_step(Step::Contact, &self.contact, state, action, env),
            BookingAction::Payment(_) => Self::on_step(Step::Payment, &self.payment, state, action, env),

            BookingAction::Advance => Self::advance(state, env),

            BookingAction::Retreat => {
                if state.is_processing() {
                    tracing::debug!("Retreat ignored: payment in flight");
                    return SmallVec::new();
                }
                match state.step.previous() {
                    Some(previous) => Self::go_to(state, previous, env),
                    None => SmallVec::new(),
                }
            },

            BookingAction::Dismount => {
                state.mounted = false;
                if let Some(submission) = state.payment.in_flight.take() {
                    tracing::info!(%submission, "Dismounted during payment, its result will be discarded");
                }
                SmallVec::new()
            },

            BookingAction::PaymentSucceeded {
                submission,
                confirmation,
            } => Self::confirm(state, submission, confirmation, env),

            BookingAction::PaymentFailed { submission, error } => Self::fail(state, submission, &error),
        }
    }
}
