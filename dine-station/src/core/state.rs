//! Station wiring
//!
//! Opens the storage once and constructs the menu store, order
//! repository and bill service over the shared handle.

use super::config::Config;
use crate::billing::{BillRenderer, BillService};
use crate::cart::Cart;
use crate::menu::MenuStore;
use crate::orders::{LiveOrderFeed, OrderRepository};
use crate::storage::StationStorage;
use bill_printer::FileExporter;
use shared::models::Order;
use shared::{AppError, AppResult};

/// A fully wired ordering station
pub struct Station {
    config: Config,
    storage: StationStorage,
    menu: MenuStore,
    orders: OrderRepository,
    billing: BillService,
}

impl Station {
    /// Open the station against its on-disk database
    ///
    /// Seeds the default menu on first open.
    pub fn open(config: Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| AppError::storage(format!("{}: {}", config.data_dir, e)))?;
        let storage = StationStorage::open(config.db_path())?;
        Self::with_storage(config, storage)
    }

    /// Open a station against an in-memory database (for tests)
    pub fn open_in_memory(config: Config) -> AppResult<Self> {
        let storage = StationStorage::open_in_memory()?;
        Self::with_storage(config, storage)
    }

    fn with_storage(config: Config, storage: StationStorage) -> AppResult<Self> {
        let menu = MenuStore::new(storage.clone())?;
        let orders = OrderRepository::new(storage.clone());
        let billing = BillService::new(
            BillRenderer::new(&config.station_name, config.bill_width, config.timezone),
            FileExporter::new(&config.export_dir),
        );

        Ok(Self {
            config,
            storage,
            menu,
            orders,
            billing,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &StationStorage {
        &self.storage
    }

    pub fn menu(&self) -> &MenuStore {
        &self.menu
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    pub fn billing(&self) -> &BillService {
        &self.billing
    }

    /// Start a live feed for the staff board
    ///
    /// Must be called from within a tokio runtime; stop the feed when the
    /// board goes away.
    pub fn live_feed(&self) -> LiveOrderFeed {
        LiveOrderFeed::spawn(self.orders.clone(), self.config.poll_interval())
    }

    /// Place the cart as a new order, clearing the cart on success
    ///
    /// The cart is left untouched when placement is rejected or the write
    /// fails, so the user can fix the problem and retry.
    pub fn place_order(
        &self,
        table_number: &str,
        order_type: Option<&str>,
        cart: &mut Cart,
    ) -> AppResult<Order> {
        let order = self.orders.place_order(table_number, order_type, cart)?;
        cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn open_station() -> Station {
        Station::open_in_memory(Config::with_overrides("/tmp/unused", "/tmp/unused-bills"))
            .unwrap()
    }

    #[test]
    fn test_station_seeds_menu() {
        let station = open_station();
        assert_eq!(station.menu().list().unwrap().len(), 5);
    }

    #[test]
    fn test_place_order_clears_cart_on_success_only() {
        let station = open_station();
        let item = station.menu().get(1).unwrap().unwrap();

        let mut cart = Cart::new();
        // Rejected: blank table, cart keeps its contents
        cart.add(&item);
        assert!(station.place_order(" ", None, &mut cart).is_err());
        assert_eq!(cart.item_count(), 1);

        let order = station.place_order("5", Some("Dining"), &mut cart).unwrap();
        assert!(cart.is_empty());
        assert_eq!(order.total_amount, Decimal::from(180));
    }
}
