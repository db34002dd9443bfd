//! Live order feed for the staff board
//!
//! Keeps a working copy of all orders and replaces it wholesale on every
//! refresh, no delta diffing. Refreshes are driven by repository change
//! notifications, with a fixed-interval re-read as fallback so the board
//! converges even when a notification is missed. There is no backoff.
//!
//! The feed starts when the board becomes visible and stops on
//! [`LiveOrderFeed::stop`] when the board is torn down.

use super::repository::OrderRepository;
use shared::models::Order;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Fallback refresh interval for the board
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Sort a working copy most-recent-first for display
pub fn sort_recent_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Live order feed
///
/// Holds the refresh task and the watch channel carrying the board's
/// working copy.
pub struct LiveOrderFeed {
    rx: watch::Receiver<Vec<Order>>,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl LiveOrderFeed {
    /// Start the feed task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(repository: OrderRepository, poll_interval: Duration) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let handle = tokio::spawn(run(repository, tx, poll_interval, token));
        Self {
            rx,
            shutdown,
            handle,
        }
    }

    /// Watch the working copy; each value is a complete, sorted list
    pub fn subscribe(&self) -> watch::Receiver<Vec<Order>> {
        self.rx.clone()
    }

    /// Current working copy, most recent first
    pub fn orders(&self) -> Vec<Order> {
        self.rx.borrow().clone()
    }

    /// Stop the feed and wait for the task to finish
    pub async fn stop(self) {
        self.shutdown.cancel();
        let _ = self.handle.await;
    }
}

async fn run(
    repository: OrderRepository,
    tx: watch::Sender<Vec<Order>>,
    poll_interval: Duration,
    shutdown: CancellationToken,
) {
    tracing::info!(interval_ms = poll_interval.as_millis() as u64, "Live order feed started");

    let mut events = repository.subscribe();
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Live order feed stopped");
                break;
            }
            // First tick fires immediately and publishes the initial copy
            _ = ticker.tick() => {
                refresh(&repository, &tx);
            }
            event = events.recv() => {
                match event {
                    Ok(_) => refresh(&repository, &tx),
                    Err(RecvError::Lagged(missed)) => {
                        // Wholesale refresh makes lost notifications harmless
                        tracing::warn!(missed, "Feed lagged behind order events");
                        refresh(&repository, &tx);
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Order event channel closed, live order feed stopping");
                        break;
                    }
                }
            }
        }
    }
}

fn refresh(repository: &OrderRepository, tx: &watch::Sender<Vec<Order>>) {
    match repository.list_orders() {
        Ok(mut orders) => {
            sort_recent_first(&mut orders);
            // The feed keeps its own receiver, so send cannot fail while it lives
            let _ = tx.send(orders);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to refresh order feed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::menu::MenuStore;
    use crate::storage::StationStorage;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shared::models::{OrderItem, OrderStatus};

    fn create_fixture() -> (MenuStore, OrderRepository) {
        let storage = StationStorage::open_in_memory().unwrap();
        let menu = MenuStore::new(storage.clone()).unwrap();
        (menu, OrderRepository::new(storage))
    }

    fn place(menu: &MenuStore, repo: &OrderRepository, table: &str) -> shared::models::Order {
        let mut cart = Cart::new();
        cart.add(&menu.get(1).unwrap().unwrap());
        repo.place_order(table, None, &cart).unwrap()
    }

    #[test]
    fn test_sort_recent_first() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mk = |id: &str, offset_secs: i64| shared::models::Order {
            id: id.to_string(),
            table_number: "1".to_string(),
            items: vec![OrderItem {
                name: "Lime Soda".to_string(),
                quantity: 1,
                price: Decimal::from(40),
            }],
            total_amount: Decimal::from(40),
            status: OrderStatus::Pending,
            created_at: base + chrono::Duration::seconds(offset_secs),
            order_type: None,
        };

        let mut orders = vec![mk("a", 0), mk("c", 20), mk("b", 10)];
        sort_recent_first(&mut orders);
        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_feed_publishes_initial_copy_and_updates() {
        let (menu, repo) = create_fixture();
        let existing = place(&menu, &repo, "1");

        let feed = LiveOrderFeed::spawn(repo.clone(), Duration::from_millis(50));
        let mut rx = feed.subscribe();

        // Initial wholesale copy
        tokio::time::timeout(Duration::from_secs(1), async {
            while rx.borrow_and_update().is_empty() {
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap();
        assert_eq!(feed.orders()[0].id, existing.id);

        // New order shows up
        let newer = place(&menu, &repo, "2");
        tokio::time::timeout(Duration::from_secs(1), async {
            while rx.borrow_and_update().len() < 2 {
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap();

        // Most recent first
        let orders = feed.orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, newer.id);

        feed.stop().await;
    }

    #[tokio::test]
    async fn test_feed_reacts_to_notifications_without_polling() {
        let (menu, repo) = create_fixture();

        // Fallback interval far beyond the test timeout: only the
        // notification path can deliver this update in time.
        let feed = LiveOrderFeed::spawn(repo.clone(), Duration::from_secs(600));
        let mut rx = feed.subscribe();

        // Allow the immediate first tick to pass
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .unwrap()
            .unwrap();

        let order = place(&menu, &repo, "9");
        tokio::time::timeout(Duration::from_secs(1), async {
            while rx.borrow_and_update().is_empty() {
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap();
        assert_eq!(feed.orders()[0].id, order.id);

        feed.stop().await;
    }

    #[tokio::test]
    async fn test_feed_sees_status_changes() {
        let (menu, repo) = create_fixture();
        let order = place(&menu, &repo, "5");

        let feed = LiveOrderFeed::spawn(repo.clone(), Duration::from_millis(50));
        let mut rx = feed.subscribe();

        repo.mark_served(&order.id).unwrap();

        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                {
                    let orders = rx.borrow_and_update();
                    if orders
                        .iter()
                        .any(|o| o.id == order.id && o.status == OrderStatus::Served)
                    {
                        break;
                    }
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap();

        feed.stop().await;
    }

    #[tokio::test]
    async fn test_stop_terminates_the_task() {
        let (_, repo) = create_fixture();
        let feed = LiveOrderFeed::spawn(repo, Duration::from_millis(10));

        // stop() waits for the task itself, so returning is the proof
        tokio::time::timeout(Duration::from_secs(1), feed.stop())
            .await
            .unwrap();
    }
}
