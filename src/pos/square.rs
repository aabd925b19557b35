//! Square POS backend
//!
//! Implements `PosBackend` against a simulated Square POS API.

use std::sync::Arc;

use super::backend::{ApiResponse, PosBackend, PosError, SimulatedApi};
use super::source::SuccessSource;
use super::{Order, Price};

/// Display name used in log records and errors
pub const PROVIDER_NAME: &str = "Square POS";

/// Simulated Square POS provider
pub struct SquarePos {
    api: SimulatedApi,
}

impl SquarePos {
    pub fn new(source: Arc<dyn SuccessSource>) -> Self {
        Self {
            api: SimulatedApi::new(PROVIDER_NAME, source),
        }
    }
}

impl PosBackend for SquarePos {
    fn name(&self) -> &str {
        self.api.provider()
    }

    fn send_order(&self, order: &Order) -> Result<ApiResponse, PosError> {
        self.api.send_order(order)
    }

    fn process_payment(&self, amount: Price) -> Result<ApiResponse, PosError> {
        self.api.process_payment(amount)
    }
}
