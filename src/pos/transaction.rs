//! Submit-then-charge driver over any POS backend

use anyhow::{Context, Result};
use serde::Serialize;

use super::backend::{ApiResponse, PosBackend, PosError};
use super::{Order, Product};

/// Aggregated result of one order/payment transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransactionOutcome {
    /// Both calls succeeded
    Completed {
        order_response: ApiResponse,
        payment_response: ApiResponse,
    },
    /// The first failing call, as a message
    Failed { error: String },
}

impl TransactionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransactionOutcome::Completed { .. })
    }

    /// Single-line JSON rendering for stdout
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize transaction outcome")
    }
}

fn run_transaction(
    backend: &dyn PosBackend,
    order: &Order,
    product: &Product,
) -> Result<TransactionOutcome, PosError> {
    let order_response = backend.send_order(order)?;
    tracing::info!("Order Response: {}", order_response);

    let payment_response = backend.process_payment(product.price())?;
    tracing::info!("Payment Response: {}", payment_response);

    Ok(TransactionOutcome::Completed {
        order_response,
        payment_response,
    })
}

/// Send `order` then charge `product` through `backend`
///
/// The first backend failure ends the transaction and is returned as
/// [`TransactionOutcome::Failed`]; nothing after it is attempted.
pub fn process_order_through_pos(
    backend: &dyn PosBackend,
    order: &Order,
    product: &Product,
) -> TransactionOutcome {
    tracing::debug!(order_id = %order.id, backend = backend.name(), "Starting transaction");

    run_transaction(backend, order, product).unwrap_or_else(|e| {
        tracing::error!("Error during POS operation: {}", e);
        TransactionOutcome::Failed {
            error: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::{FixedOutcomes, OrderKind, Price, SquarePos, ToastPos};
    use std::sync::Arc;

    fn pizza() -> Product {
        Product::new("Margherita Pizza", Price::from_cents(1599))
    }

    #[test]
    fn test_both_calls_succeed() {
        let source = Arc::new(FixedOutcomes::always(true));
        let backend = ToastPos::new(source.clone());

        let outcome =
            process_order_through_pos(&backend, &Order::new(OrderKind::DineIn), &pizza());

        assert_eq!(
            outcome,
            TransactionOutcome::Completed {
                order_response: ApiResponse::success(),
                payment_response: ApiResponse::success(),
            }
        );
        assert_eq!(source.draws(), 2);
    }

    #[test]
    fn test_charge_failure_is_not_partial_success() {
        let source = Arc::new(FixedOutcomes::new(vec![true, false]));
        let backend = ToastPos::new(source.clone());

        let outcome =
            process_order_through_pos(&backend, &Order::new(OrderKind::DineIn), &pizza());

        assert_eq!(
            outcome,
            TransactionOutcome::Failed {
                error: "Toast POS API Error: Failed to process payment.".to_string()
            }
        );
        assert!(!outcome.is_completed());
    }

    #[test]
    fn test_submit_failure_skips_payment() {
        let source = Arc::new(FixedOutcomes::new(vec![false, true]));
        let backend = SquarePos::new(source.clone());

        let outcome =
            process_order_through_pos(&backend, &Order::new(OrderKind::Takeout), &pizza());

        assert_eq!(
            outcome,
            TransactionOutcome::Failed {
                error: "Square POS API Error: Failed to send order.".to_string()
            }
        );
        assert_eq!(source.draws(), 1);
    }

    #[test]
    fn test_outcome_json_shape() {
        let completed = TransactionOutcome::Completed {
            order_response: ApiResponse::success(),
            payment_response: ApiResponse::success(),
        };
        assert_eq!(
            completed.to_json().unwrap(),
            r#"{"order_response":{"status":200,"message":"Success"},"payment_response":{"status":200,"message":"Success"}}"#
        );

        let failed = TransactionOutcome::Failed {
            error: "Toast POS API Error: Failed to send order.".to_string(),
        };
        assert_eq!(
            failed.to_json().unwrap(),
            r#"{"error":"Toast POS API Error: Failed to send order."}"#
        );
    }
}
