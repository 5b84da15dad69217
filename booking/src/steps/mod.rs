//! The four wizard steps.
//!
//! Each interactive step owns a slice of the booking state, a child reducer for
//! its own inputs and a view model. Cross-step rules (validation on advance,
//! payment submission, navigation) live in the orchestrator.

pub mod confirmation;
pub mod contact;
pub mod payment;
pub mod tickets;

pub use confirmation::ConfirmationView;
pub use contact::{ContactAction, ContactForm, ContactReducer, ContactState, ContactView};
pub use payment::{PaymentAction, PaymentForm, PaymentReducer, PaymentState, PaymentView};
pub use tickets::{BookingSelection, TicketsAction, TicketsReducer, TicketsState, TicketsView};
