//! Mobile-money payment gateway.
//!
//! The wizard talks to the operator through [`PaymentGateway`]. There is no
//! real integration: [`MockPaymentGateway`] simulates the operator's latency and
//! can be told to decline some numbers.

use crate::config::BookingConfig;
use crate::error::PaymentError;
use crate::types::{Money, PaymentMethod, SubmissionId};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Payment gateway result
pub type GatewayResult<T> = Result<T, PaymentError>;

/// Boxed future returned by gateway calls
pub type GatewayFuture<T> = Pin<Box<dyn Future<Output = GatewayResult<T>> + Send>>;

/// A debit request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Submission this request belongs to
    pub submission: SubmissionId,
    /// Operator to debit
    pub method: PaymentMethod,
    /// Ten-digit number, whitespace removed
    pub number: String,
    /// Amount to debit
    pub amount: Money,
}

/// Successful debit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Operator transaction id
    pub transaction_id: String,
    /// Operator debited
    pub method: PaymentMethod,
    /// Amount debited
    pub amount: Money,
}

/// Payment gateway trait
///
/// Abstraction over mobile-money operators.
pub trait PaymentGateway: Send + Sync {
    /// Debit the buyer
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] if the operator declines or cannot be reached.
    fn submit(&self, request: PaymentRequest) -> GatewayFuture<PaymentConfirmation>;
}

/// Mock payment gateway
///
/// Waits `delay`, then approves every request unless the number starts with
/// the configured decline prefix.
#[derive(Clone, Debug)]
pub struct MockPaymentGateway {
    delay: Duration,
    decline_prefix: Option<String>,
}

impl MockPaymentGateway {
    /// Approves everything after `delay`
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            decline_prefix: None,
        }
    }

    /// Answers immediately
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Declines numbers starting with `prefix`
    #[must_use]
    pub fn declining(mut self, prefix: impl Into<String>) -> Self {
        self.decline_prefix = Some(prefix.into());
        self
    }

    /// Gateway configured from [`BookingConfig`]
    #[must_use]
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            delay: config.processing_delay(),
            decline_prefix: config.decline_prefix.clone(),
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn PaymentGateway> {
        Arc::new(self)
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::from_config(&BookingConfig::default())
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn submit(&self, request: PaymentRequest) -> GatewayFuture<PaymentConfirmation> {
        let delay = self.delay;
        let declined = self
            .decline_prefix
            .as_deref()
            .is_some_and(|prefix| request.number.starts_with(prefix));

        Box::pin(async move {
            // Simulate operator latency
            tokio::time::sleep(delay).await;

            if declined {
                tracing::info!(
                    submission = %request.submission,
                    method = %request.method,
                    "Mock payment declined"
                );
                return Err(PaymentError::Declined {
                    reason: "numéro refusé par l'opérateur".to_string(),
                });
            }

            let transaction_id = format!("mock_txn_{}", uuid::Uuid::new_v4());

            tracing::info!(
                submission = %request.submission,
                method = %request.method,
                amount = request.amount.cents(),
                transaction_id = %transaction_id,
                "Mock payment processed successfully"
            );

            Ok(PaymentConfirmation {
                transaction_id,
                method: request.method,
                amount: request.amount,
            })
        })
    }
}
