//! Session cart
//!
//! Lives only for the lifetime of an ordering session; nothing here is
//! persisted. At most one entry exists per menu item, repeated adds
//! aggregate into the entry's quantity, and a quantity of zero removes
//! the entry entirely.

use rust_decimal::Decimal;
use shared::models::{MenuItem, OrderItem};

/// A menu item selected into the cart, with its quantity
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    /// Line total (price x quantity)
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// In-memory cart, preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a menu item
    ///
    /// An existing entry for the same item id gets its quantity bumped;
    /// otherwise a new entry is appended with quantity 1.
    pub fn add(&mut self, item: &MenuItem) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item.id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartItem {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Set an entry's quantity (absolute, not a delta)
    ///
    /// A quantity of zero removes the entry.
    pub fn set_quantity(&mut self, item_id: u32, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
        } else if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item_id) {
            entry.quantity = quantity;
        }
    }

    /// Remove an entry; no-op when absent
    pub fn remove(&mut self, item_id: u32) {
        self.entries.retain(|e| e.item.id != item_id);
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of line totals; zero for an empty cart
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all entries
    ///
    /// Badges the cart affordance; the affordance is hidden at zero.
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.entries
    }

    /// Denormalized line-item snapshot for order placement
    ///
    /// Cart order is preserved; the snapshot stays valid after later menu
    /// edits.
    pub fn snapshot(&self) -> Vec<OrderItem> {
        self.entries
            .iter()
            .map(|e| OrderItem {
                name: e.item.name.clone(),
                quantity: e.quantity,
                price: e.item.price,
            })
            .collect()
    }
}
