//! POS backend trait and the simulated API shared by the providers
//!
//! This module defines the abstraction over third-party POS providers. Each
//! provider implements `PosBackend`; calls are simulated and resolved by an
//! injected [`SuccessSource`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::source::SuccessSource;
use super::{Order, Price};

/// Response returned by a (simulated) provider API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub message: String,
}

impl ApiResponse {
    pub const OK: u16 = 200;
    pub const SERVER_ERROR: u16 = 500;

    pub fn success() -> Self {
        Self {
            status: Self::OK,
            message: "Success".to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            status: Self::SERVER_ERROR,
            message: "API error".to_string(),
        }
    }

    /// Build the response a provider would return for the given outcome
    pub fn simulate(success: bool) -> Self {
        if success {
            Self::success()
        } else {
            Self::failure()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::OK
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status={} message={}", self.status, self.message)
    }
}

/// Errors raised by a POS backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PosError {
    /// The provider rejected the order submission.
    #[error("{provider} API Error: Failed to send order.")]
    OrderFailed { provider: String },

    /// The provider rejected the payment.
    #[error("{provider} API Error: Failed to process payment.")]
    PaymentFailed { provider: String },
}

/// Trait for POS backends
///
/// # Object Safety
/// This trait is object-safe to allow `Box<dyn PosBackend>` usage.
pub trait PosBackend: Send + Sync {
    /// Provider display name, e.g. "Toast POS"
    fn name(&self) -> &str;

    /// Submit an order to the provider
    fn send_order(&self, order: &Order) -> Result<ApiResponse, PosError>;

    /// Charge a payment through the provider
    fn process_payment(&self, amount: Price) -> Result<ApiResponse, PosError>;
}

/// Simulated provider API, parameterised by provider name
pub(crate) struct SimulatedApi {
    provider: &'static str,
    source: Arc<dyn SuccessSource>,
}

impl SimulatedApi {
    pub(crate) fn new(provider: &'static str, source: Arc<dyn SuccessSource>) -> Self {
        Self { provider, source }
    }

    pub(crate) fn provider(&self) -> &'static str {
        self.provider
    }

    fn call(&self) -> ApiResponse {
        ApiResponse::simulate(self.source.next_success())
    }

    pub(crate) fn send_order(&self, order: &Order) -> Result<ApiResponse, PosError> {
        tracing::info!("Sending order to {}...", self.provider);
        let response = self.call();
        if response.is_success() {
            tracing::info!("{}: {}", self.provider, order.process());
            Ok(response)
        } else {
            tracing::error!(
                "Error while sending order to {}: {}",
                self.provider,
                response.message
            );
            Err(PosError::OrderFailed {
                provider: self.provider.to_string(),
            })
        }
    }

    pub(crate) fn process_payment(&self, amount: Price) -> Result<ApiResponse, PosError> {
        tracing::info!("Processing payment of {} via {}...", amount, self.provider);
        let response = self.call();
        if response.is_success() {
            tracing::info!(
                "{}: Payment of {} processed successfully.",
                self.provider,
                amount
            );
            Ok(response)
        } else {
            tracing::error!(
                "Error while processing the payment in {}: {}",
                self.provider,
                response.message
            );
            Err(PosError::PaymentFailed {
                provider: self.provider.to_string(),
            })
        }
    }
}
