//! Order repository
//!
//! Orders are created once from a cart snapshot, then only their status
//! ever changes. Each write happens inside a single storage transaction
//! and is broadcast after commit.
//!
//! # Write failures
//!
//! A failed write is logged and returned to the caller so the flow can
//! surface it; the order (or status change) is simply lost. There is no
//! retry.

use crate::cart::Cart;
use crate::storage::{StationStorage, StorageError};
use chrono::Utc;
use shared::models::{Order, OrderStatus};
use shared::util::now_millis;
use shared::{AppError, AppResult};
use tokio::sync::broadcast;

/// Order change channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Change notification emitted after a committed order write
#[derive(Debug, Clone)]
pub enum OrderEvent {
    /// A new order was placed
    Placed(Order),
    /// An order's status changed
    StatusChanged {
        order_id: String,
        status: OrderStatus,
    },
}

/// Order repository over the station storage
#[derive(Clone)]
pub struct OrderRepository {
    storage: StationStorage,
    event_tx: broadcast::Sender<OrderEvent>,
}

impl OrderRepository {
    pub fn new(storage: StationStorage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { storage, event_tx }
    }

    /// Subscribe to order change broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Place the cart's contents as a new order
    ///
    /// Rejects a blank table identifier and an empty cart before touching
    /// any state. The order id is the table identifier plus the epoch
    /// millisecond of placement; two orders for one table in the same
    /// millisecond would collide, which a single user action cannot
    /// produce.
    pub fn place_order(
        &self,
        table_number: &str,
        order_type: Option<&str>,
        cart: &Cart,
    ) -> AppResult<Order> {
        let table = table_number.trim();
        if table.is_empty() {
            return Err(AppError::validation("Table number is not specified"));
        }
        if cart.is_empty() {
            return Err(AppError::validation("Your cart is empty"));
        }

        let order = Order {
            id: format!("{}-{}", table, now_millis()),
            table_number: table.to_string(),
            items: cart.snapshot(),
            total_amount: cart.total(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            order_type: order_type.map(str::to_string),
        };

        if let Err(e) = self.persist(&order) {
            tracing::error!(order_id = %order.id, error = %e, "Could not save order");
            return Err(e.into());
        }

        tracing::info!(
            order_id = %order.id,
            table = %order.table_number,
            total = %order.total_amount,
            "Order placed"
        );
        self.notify(OrderEvent::Placed(order.clone()));
        Ok(order)
    }

    fn persist(&self, order: &Order) -> Result<(), StorageError> {
        let txn = self.storage.begin_write()?;
        self.storage.put_order(&txn, order)?;
        txn.commit()?;
        Ok(())
    }

    /// All orders, in storage order
    ///
    /// Display ordering (most recent first) is a view concern, see
    /// [`sort_recent_first`](super::sort_recent_first).
    pub fn list_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.storage.orders()?)
    }

    /// Get an order by id
    ///
    /// `Ok(None)` means the order does not exist, a recoverable state,
    /// distinct from a failed read.
    pub fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(self.storage.get_order(id)?)
    }

    /// Mark an order served
    ///
    /// Pending -> Served is the only transition and it is irreversible.
    /// Marking an already-served order is a no-op that returns the order
    /// unchanged. The read-modify-write runs inside one transaction, so
    /// concurrent status changes on other orders are never lost.
    pub fn mark_served(&self, id: &str) -> AppResult<Order> {
        let txn = self.storage.begin_write()?;
        let Some(mut order) = self.storage.get_order_txn(&txn, id)? else {
            return Err(AppError::not_found(format!("Order {}", id)));
        };

        if order.status == OrderStatus::Served {
            return Ok(order);
        }

        order.status = OrderStatus::Served;
        self.storage.put_order(&txn, &order)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(order_id = %id, "Order marked as served");
        self.notify(OrderEvent::StatusChanged {
            order_id: order.id.clone(),
            status: order.status,
        });
        Ok(order)
    }

    fn notify(&self, event: OrderEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!("Order broadcast skipped: no active receivers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuStore;
    use rust_decimal::Decimal;
    use shared::models::MenuItemUpdate;

    fn create_fixture() -> (MenuStore, OrderRepository) {
        let storage = StationStorage::open_in_memory().unwrap();
        let menu = MenuStore::new(storage.clone()).unwrap();
        (menu, OrderRepository::new(storage))
    }

    /// Cart with one Chicken Biryani (180) and two French Fries (90)
    fn loaded_cart(menu: &MenuStore) -> Cart {
        let mut cart = Cart::new();
        cart.add(&menu.get(1).unwrap().unwrap());
        cart.add(&menu.get(3).unwrap().unwrap());
        cart.set_quantity(3, 2);
        cart
    }

    #[test]
    fn test_place_order_round_trip() {
        let (menu, repo) = create_fixture();
        let cart = loaded_cart(&menu);

        let order = repo.place_order("5", Some("Dining"), &cart).unwrap();
        assert!(order.id.starts_with("5-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Decimal::from(360));

        let fetched = repo.get_order(&order.id).unwrap().unwrap();
        assert_eq!(fetched, order);
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].name, "Chicken Biryani");
        assert_eq!(fetched.items[1].quantity, 2);
    }

    #[test]
    fn test_order_snapshot_survives_menu_edits() {
        let (menu, repo) = create_fixture();
        let order = repo.place_order("5", None, &loaded_cart(&menu)).unwrap();

        // Repricing the menu must not rewrite history
        menu.update(
            1,
            MenuItemUpdate {
                price: Some(Decimal::from(999)),
                name: Some("Special Biryani".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let fetched = repo.get_order(&order.id).unwrap().unwrap();
        assert_eq!(fetched.items[0].name, "Chicken Biryani");
        assert_eq!(fetched.items[0].price, Decimal::from(180));
        assert_eq!(fetched.total_amount, Decimal::from(360));
    }

    #[test]
    fn test_empty_cart_is_rejected_without_writing() {
        let (_, repo) = create_fixture();

        let err = repo.place_order("5", None, &Cart::new()).unwrap_err();
        assert!(err.is_validation());
        assert!(repo.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_blank_table_is_rejected_without_writing() {
        let (menu, repo) = create_fixture();

        let err = repo.place_order("   ", None, &loaded_cart(&menu)).unwrap_err();
        assert!(err.is_validation());
        assert!(repo.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_mark_served_is_idempotent() {
        let (menu, repo) = create_fixture();
        let placed = repo.place_order("5", None, &loaded_cart(&menu)).unwrap();

        let served = repo.mark_served(&placed.id).unwrap();
        assert_eq!(served.status, OrderStatus::Served);

        let again = repo.mark_served(&placed.id).unwrap();
        assert_eq!(again.status, OrderStatus::Served);

        // Only the status changed
        let fetched = repo.get_order(&placed.id).unwrap().unwrap();
        assert_eq!(fetched.items, placed.items);
        assert_eq!(fetched.total_amount, placed.total_amount);
        assert_eq!(fetched.created_at, placed.created_at);
        assert_eq!(fetched.table_number, placed.table_number);
    }

    #[test]
    fn test_mark_served_unknown_order() {
        let (_, repo) = create_fixture();
        let err = repo.mark_served("5-123").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_order_missing_is_none_not_error() {
        let (_, repo) = create_fixture();
        assert!(repo.get_order("no-such-order").unwrap().is_none());
    }

    #[test]
    fn test_writes_are_broadcast_once() {
        let (menu, repo) = create_fixture();
        let mut rx = repo.subscribe();

        let order = repo.place_order("5", None, &loaded_cart(&menu)).unwrap();
        match rx.try_recv().unwrap() {
            OrderEvent::Placed(placed) => assert_eq!(placed.id, order.id),
            other => panic!("unexpected event: {:?}", other),
        }

        repo.mark_served(&order.id).unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            OrderEvent::StatusChanged {
                status: OrderStatus::Served,
                ..
            }
        ));

        // Re-serving is a no-op and must not re-broadcast
        repo.mark_served(&order.id).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_orders_from_multiple_tables_coexist() {
        let (menu, repo) = create_fixture();
        let cart = loaded_cart(&menu);

        let first = repo.place_order("5", None, &cart).unwrap();
        let second = repo.place_order("7", None, &cart).unwrap();
        assert_ne!(first.id, second.id);

        let orders = repo.list_orders().unwrap();
        assert_eq!(orders.len(), 2);
    }
}
