//! Orders and products sent through a POS backend

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Price;

/// Unique identifier for an order
pub type OrderId = Uuid;

/// How the customer is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    #[default]
    DineIn,
    Takeout,
}

impl OrderKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderKind::DineIn => "dine-in",
            OrderKind::Takeout => "takeout",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
}

impl Order {
    /// Create a new order with a fresh id
    pub fn new(kind: OrderKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
        }
    }

    /// Describe the processing step for this order and record it
    pub fn process(&self) -> String {
        let message = format!("Processing {} order.", self.kind);
        tracing::info!("{}", message);
        message
    }
}

/// A sellable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    price: Price,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// The price to charge, recorded in the log
    pub fn price(&self) -> Price {
        tracing::info!("Price of {}: {}", self.name, self.price);
        self.price
    }
}
