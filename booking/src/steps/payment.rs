//! Step 3: mobile-money payment.
//!
//! The buyer picks an operator and types the number to debit. While a
//! submission is in flight every input is frozen.

use crate::types::{FieldErrors, PaymentField, PaymentMethod, SubmissionId};
use event_place_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use serde::{Deserialize, Serialize};

/// Longest value the number input accepts
pub const MAX_NUMBER_LENGTH: usize = 14;

/// Payment form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    /// Operator to debit
    pub method: PaymentMethod,
    /// Number as typed, whitespace included
    pub number: String,
}

/// State of the payment step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentState {
    /// Form values
    pub form: PaymentForm,
    /// Errors of the last validation pass
    pub errors: FieldErrors<PaymentField>,
    /// Submission awaiting the gateway
    pub in_flight: Option<SubmissionId>,
    /// Message of the last failed submission
    pub submission_error: Option<String>,
}

impl PaymentState {
    /// Waiting for the gateway
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }
}

/// Intents of the payment step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentAction {
    /// Operator picked
    SelectMethod(PaymentMethod),
    /// Number input changed
    EditNumber(String),
}

/// Reducer for the payment step
#[derive(Clone, Debug, Default)]
pub struct PaymentReducer;

impl Reducer for PaymentReducer {
    type State = PaymentState;
    type Action = PaymentAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut PaymentState,
        action: PaymentAction,
        _env: &(),
    ) -> SmallVec<[Effect<PaymentAction>; 4]> {
        if state.is_processing() {
            tracing::debug!("Ignored payment input while processing");
            return smallvec![Effect::None];
        }

        match action {
            PaymentAction::SelectMethod(method) => {
                state.form.method = method;
            },
            PaymentAction::EditNumber(value) => {
                state.form.number = value.chars().take(MAX_NUMBER_LENGTH).collect();
            },
        }

        smallvec![Effect::None]
    }
}

/// One operator on the selector
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodOptionView {
    /// Operator
    pub method: PaymentMethod,
    /// Label
    pub label: &'static str,
    /// Radio state
    pub selected: bool,
}

/// View model of the payment step
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    /// Operators in display order
    pub methods: Vec<MethodOptionView>,
    /// Number as typed
    pub number: String,
    /// `maxLength` of the input
    pub max_length: usize,
    /// Inline error under the number
    pub number_error: Option<String>,
    /// Spinner shown, inputs disabled
    pub processing: bool,
    /// Message of the last failed submission
    pub submission_error: Option<String>,
}

impl PaymentView {
    /// Builds the view from the step state
    #[must_use]
    pub fn build(state: &PaymentState) -> Self {
        let methods = PaymentMethod::ALL
            .into_iter()
            .map(|method| MethodOptionView {
                method,
                label: method.label(),
                selected: state.form.method == method,
            })
            .collect();

        Self {
            methods,
            number: state.form.number.clone(),
            max_length: MAX_NUMBER_LENGTH,
            number_error: state.errors.get(&PaymentField::Number).map(str::to_string),
            processing: state.is_processing(),
            submission_error: state.submission_error.clone(),
        }
    }
}
