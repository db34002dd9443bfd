//! Order Model
//!
//! An order's content is immutable after placement; only `status` ever
//! changes, and only in one direction (Pending -> Served).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status, a two-state machine, transition Pending -> Served only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Served,
}

/// Line item snapshot taken at placement time
///
/// Decoupled from [`MenuItem`](super::MenuItem) so later menu edits never
/// retroactively alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price at placement time
    pub price: Decimal,
}

impl OrderItem {
    /// Line total (price x quantity)
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// `{table}-{epoch_millis}`, unique without coordination
    pub id: String,
    /// Dining table number, or an order-type label for non-dining orders
    pub table_number: String,
    /// Insertion order = cart order
    pub items: Vec<OrderItem>,
    /// Sum of line totals, fixed at placement time
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// e.g. "Dining" for table service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
}

impl Order {
    /// Sum of line totals, equals `total_amount` at creation time
    pub fn computed_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Total number of units across all line items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
