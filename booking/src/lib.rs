//! # Event Place booking
//!
//! The multi-step booking wizard of Event Place: pick a ticket category and a
//! quantity, give contact details, pay by mobile money and get a receipt.
//!
//! The wizard is a single [`BookingReducer`] over [`BookingState`], run by the
//! [`event_place_runtime::Store`]. Side effects go through the injected
//! [`BookingEnvironment`]:
//!
//! - [`PaymentGateway`] submits the payment (mocked, simulated latency)
//! - [`ReferenceGenerator`] draws the booking reference once per payment
//! - [`Navigator`] scrolls the page on every step change
//! - [`Clock`](event_place_core::environment::Clock) stamps the receipt
//!
//! Views are plain data built from the state by [`BookingView::build`].
//!
//! # Example
//!
//! ```
//! use event_place_booking::{
//!     BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState, Catalog,
//!     EventId, MockPaymentGateway, Step,
//! };
//! use event_place_booking::mocks::{RecordingNavigator, SequentialReferenceGenerator};
//! use event_place_core::environment::SystemClock;
//! use event_place_runtime::Store;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let env = BookingEnvironment::new(
//!     Arc::new(SystemClock),
//!     MockPaymentGateway::instant().shared(),
//!     Arc::new(SequentialReferenceGenerator::default()),
//!     Arc::new(RecordingNavigator::default()),
//!     BookingConfig::default(),
//! );
//! let state = BookingState::new(EventId::new("concert-42"), Catalog::demo()?, None);
//! let store = Store::new(state, BookingReducer::new(), env);
//!
//! store.send(BookingAction::Advance).await?;
//! assert_eq!(store.state(|s| s.step).await, Step::Contact);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mocks;
pub mod navigation;
pub mod pricing;
pub mod receipt;
pub mod reducer;
pub mod steps;
pub mod types;
pub mod validation;
pub mod view;

pub use catalog::{Catalog, TicketCategory};
pub use config::{BookingConfig, QrConfig};
pub use error::{CatalogError, ConfigError, PaymentError};
pub use gateway::{MockPaymentGateway, PaymentConfirmation, PaymentGateway, PaymentRequest};
pub use navigation::{LoggingNavigator, Navigator};
pub use pricing::Pricing;
pub use receipt::{BookingReference, RandomReferenceGenerator, Receipt, ReferenceGenerator};
pub use reducer::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
pub use types::{EventId, Money, PaymentMethod, Quantity, Step, SubmissionId, TicketCategoryId};
pub use view::BookingView;
