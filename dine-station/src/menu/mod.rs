//! Menu catalog store
//!
//! The catalog is seeded from the built-in default list the first time a
//! station opens with an empty `menu_items` table. Every write is
//! broadcast, so views holding an in-memory copy of the menu can refresh
//! without re-reading on a timer.
//!
//! Editing the catalog never touches placed orders, those carry their
//! own line-item snapshots.

pub mod seed;

use crate::storage::{StationStorage, StorageError};
use rust_decimal::Decimal;
use shared::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::{AppError, AppResult};
use tokio::sync::broadcast;

/// Menu change channel capacity
const MENU_CHANNEL_CAPACITY: usize = 256;

/// Change notification emitted after a committed catalog write
#[derive(Debug, Clone)]
pub enum MenuEvent {
    Added(MenuItem),
    Updated(MenuItem),
}

/// Menu catalog store
#[derive(Clone)]
pub struct MenuStore {
    storage: StationStorage,
    event_tx: broadcast::Sender<MenuEvent>,
}

impl MenuStore {
    /// Create the store, seeding the default menu on an empty catalog
    pub fn new(storage: StationStorage) -> AppResult<Self> {
        let (event_tx, _) = broadcast::channel(MENU_CHANNEL_CAPACITY);
        let store = Self { storage, event_tx };
        store.seed_if_empty()?;
        Ok(store)
    }

    fn seed_if_empty(&self) -> AppResult<()> {
        if self.storage.menu_len()? > 0 {
            return Ok(());
        }

        let items = seed::default_menu();
        let txn = self.storage.begin_write()?;
        for item in &items {
            self.storage.put_menu_item(&txn, item)?;
        }
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(count = items.len(), "Seeded default menu");
        Ok(())
    }

    /// Subscribe to catalog change broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<MenuEvent> {
        self.event_tx.subscribe()
    }

    /// All menu items, in id order
    pub fn list(&self) -> AppResult<Vec<MenuItem>> {
        Ok(self.storage.menu_items()?)
    }

    /// Menu items in one category, in id order
    pub fn list_category(&self, category: MenuCategory) -> AppResult<Vec<MenuItem>> {
        let mut items = self.storage.menu_items()?;
        items.retain(|i| i.category == category);
        Ok(items)
    }

    /// Get a menu item by id
    pub fn get(&self, id: u32) -> AppResult<Option<MenuItem>> {
        Ok(self.storage.get_menu_item(id)?)
    }

    /// Add a new menu item, assigning the next free id
    pub fn add(&self, create: MenuItemCreate) -> AppResult<MenuItem> {
        let name = create.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Item name must not be empty"));
        }
        if create.price <= Decimal::ZERO {
            return Err(AppError::validation("Price must be a positive number"));
        }

        let txn = self.storage.begin_write()?;
        let id = self.storage.next_menu_id(&txn)?;
        let item = MenuItem {
            id,
            name: name.to_string(),
            category: create.category,
            price: create.price,
            description: create.description,
            image: create
                .image
                .unwrap_or_else(|| format!("https://picsum.photos/seed/{}/600/400", id)),
        };
        self.storage.put_menu_item(&txn, &item)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(item_id = id, name = %item.name, "Menu item added");
        self.notify(MenuEvent::Added(item.clone()));
        Ok(item)
    }

    /// Apply an update to an existing menu item
    pub fn update(&self, id: u32, update: MenuItemUpdate) -> AppResult<MenuItem> {
        if let Some(price) = update.price
            && price <= Decimal::ZERO
        {
            return Err(AppError::validation("Price must be a positive number"));
        }

        let txn = self.storage.begin_write()?;
        let Some(mut item) = self.storage.get_menu_item_txn(&txn, id)? else {
            return Err(AppError::not_found(format!("Menu item {}", id)));
        };

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("Item name must not be empty"));
            }
            item.name = name;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(image) = update.image {
            item.image = image;
        }

        self.storage.put_menu_item(&txn, &item)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(item_id = id, "Menu item updated");
        self.notify(MenuEvent::Updated(item.clone()));
        Ok(item)
    }

    fn notify(&self, event: MenuEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!("Menu broadcast skipped: no active receivers");
        }
    }
}
