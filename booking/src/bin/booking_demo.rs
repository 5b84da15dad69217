//! Booking wizard demo
//!
//! Walks one buyer through the whole booking flow on the in-memory store and
//! prints the page view model after every step:
//! - ticket selection (2 x Standard)
//! - contact form, first with a typo in the e-mail
//! - mobile-money payment through the mock gateway
//! - receipt with booking reference and QR code
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin booking-demo
//!
//! # Make the mock gateway decline the demo number
//! BOOKING_DECLINE_PREFIX=0190 cargo run --bin booking-demo
//! ```

use anyhow::Context;
use event_place_booking::steps::{ContactAction, PaymentAction, TicketsAction};
use event_place_booking::types::ContactField;
use event_place_booking::{
    BookingAction, BookingConfig, BookingEnvironment, BookingReducer, BookingState, BookingView,
    Catalog, EventId, LoggingNavigator, MockPaymentGateway, PaymentMethod, RandomReferenceGenerator,
};
use event_place_core::environment::SystemClock;
use event_place_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_demo=info,event_place_booking=debug,event_place_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    event_place_runtime::metrics::describe();

    let config = BookingConfig::from_env().context("invalid booking configuration")?;
    info!(
        commission_bps = config.commission_bps,
        processing_delay_ms = config.processing_delay_ms,
        "Configuration loaded"
    );

    let env = BookingEnvironment::new(
        Arc::new(SystemClock),
        MockPaymentGateway::from_config(&config).shared(),
        Arc::new(RandomReferenceGenerator),
        Arc::new(LoggingNavigator),
        config.clone(),
    );
    let state = BookingState::new(EventId::new("festival-ouidah-2025"), Catalog::demo()?, None);
    let store = Store::new(state, BookingReducer::new(), env);

    println!("\n=== Event Place booking demo ===\n");

    println!("1. Tickets");
    store.send(BookingAction::Tickets(TicketsAction::IncrementQuantity)).await?;
    print_view(&store, &config).await?;
    store.send(BookingAction::Advance).await?;

    println!("2. Contact");
    for (field, value) in [
        (ContactField::FirstName, "Jean"),
        (ContactField::LastName, "Dupont"),
        (ContactField::Email, "jean.dupont@exemple"),
    ] {
        store.send(edit(field, value)).await?;
    }
    store.send(BookingAction::Advance).await?;
    print_view(&store, &config).await?;

    store.send(edit(ContactField::Email, "jean.dupont@exemple.bj")).await?;
    store.send(BookingAction::Advance).await?;

    println!("3. Payment");
    store
        .send(BookingAction::Payment(PaymentAction::SelectMethod(PaymentMethod::Mtn)))
        .await?;
    store
        .send(BookingAction::Payment(PaymentAction::EditNumber("01 90 00 00 00".to_string())))
        .await?;
    print_view(&store, &config).await?;

    let timeout = config.processing_delay() + Duration::from_secs(5);
    let outcome = store
        .send_and_wait_for(BookingAction::Advance, BookingAction::is_outcome, timeout)
        .await?;
    info!(outcome = outcome.name(), "Gateway answered");

    println!("4. {}", store.state(|s| s.step.title()).await);
    print_view(&store, &config).await?;

    store.send(BookingAction::Dismount).await?;
    store.shutdown_gracefully().await?;

    Ok(())
}

fn edit(field: ContactField, value: &str) -> BookingAction {
    BookingAction::Contact(ContactAction::Edit {
        field,
        value: value.to_string(),
    })
}

async fn print_view(store: &BookingStore, config: &BookingConfig) -> anyhow::Result<()> {
    let view = store.state(|s| BookingView::build(s, config)).await;
    println!("{}\n", serde_json::to_string_pretty(&view)?);
    Ok(())
}
