//! Point-of-sale simulation
//!
//! Orders and products are sent through interchangeable simulated providers.
//! Every provider implements [`PosBackend`]; [`BackendKind`] selects one.

mod backend;
mod order;
mod price;
mod source;
mod square;
mod toast;
mod transaction;

pub use backend::{ApiResponse, PosBackend, PosError};
pub use order::{Order, OrderId, OrderKind, Product};
pub use price::Price;
pub use source::{FixedOutcomes, SeededSource, SuccessSource, ThreadRngSource};
pub use square::SquarePos;
pub use toast::ToastPos;
pub use transaction::{process_order_through_pos, TransactionOutcome};

use std::sync::Arc;

/// Supported POS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Toast,
    Square,
}

impl BackendKind {
    /// All providers, in the order the demo runs them
    pub const ALL: [BackendKind; 2] = [BackendKind::Toast, BackendKind::Square];

    /// Get the display name for this provider
    pub fn display_name(&self) -> &'static str {
        match self {
            BackendKind::Toast => toast::PROVIDER_NAME,
            BackendKind::Square => square::PROVIDER_NAME,
        }
    }

    /// Create a backend instance drawing outcomes from `source`
    pub fn create_backend(&self, source: Arc<dyn SuccessSource>) -> Box<dyn PosBackend> {
        match self {
            BackendKind::Toast => Box::new(ToastPos::new(source)),
            BackendKind::Square => Box::new(SquarePos::new(source)),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Success source for the demo: seeded when a seed is configured
pub fn success_source(seed: Option<u64>) -> Arc<dyn SuccessSource> {
    match seed {
        Some(seed) => Arc::new(SeededSource::new(seed)),
        None => Arc::new(ThreadRngSource),
    }
}
