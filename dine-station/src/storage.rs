//! redb-based storage layer for the station
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `menu_items` | `item_id` | `MenuItem` | Menu catalog |
//! | `orders` | `order_id` | `Order` | Placed orders |
//!
//! Values are JSON. Orders are stored per record, so a status change
//! rewrites one record inside one transaction instead of the whole list,
//! and two writers touching different orders cannot lose each other's
//! updates.
//!
//! # Degraded reads
//!
//! A record that no longer deserializes is treated as missing: scans skip
//! it with a diagnostic and keep going. The views stay available even if
//! a value on disk is garbage.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::models::{MenuItem, Order};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for the menu catalog: key = item id, value = JSON-serialized MenuItem
const MENU_TABLE: TableDefinition<u32, &[u8]> = TableDefinition::new("menu_items");

/// Table for placed orders: key = order id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for shared::AppError {
    fn from(err: StorageError) -> Self {
        shared::AppError::storage(err.to_string())
    }
}

/// Station storage backed by redb
///
/// Cheap to clone; all clones share one database handle.
#[derive(Clone)]
pub struct StationStorage {
    db: Arc<Database>,
}

impl StationStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable and atomic (copy-on-write with atomic
    /// pointer swap), so the file is always in a consistent state.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for tests)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(MENU_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Menu Operations ==========

    /// Store a menu item (within transaction)
    pub fn put_menu_item(&self, txn: &WriteTransaction, item: &MenuItem) -> StorageResult<()> {
        let mut table = txn.open_table(MENU_TABLE)?;
        let value = serde_json::to_vec(item)?;
        table.insert(item.id, value.as_slice())?;
        Ok(())
    }

    /// Get a menu item by id
    pub fn get_menu_item(&self, id: u32) -> StorageResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_TABLE)?;

        match table.get(id)? {
            Some(value) => match serde_json::from_slice::<MenuItem>(value.value()) {
                Ok(item) => Ok(Some(item)),
                Err(e) => {
                    tracing::warn!(item_id = id, error = %e, "Unreadable menu record, treating as missing");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Get a menu item by id (within transaction)
    pub fn get_menu_item_txn(
        &self,
        txn: &WriteTransaction,
        id: u32,
    ) -> StorageResult<Option<MenuItem>> {
        let table = txn.open_table(MENU_TABLE)?;

        match table.get(id)? {
            Some(value) => match serde_json::from_slice::<MenuItem>(value.value()) {
                Ok(item) => Ok(Some(item)),
                Err(e) => {
                    tracing::warn!(item_id = id, error = %e, "Unreadable menu record, treating as missing");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Get all menu items, in id order
    pub fn menu_items(&self) -> StorageResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_TABLE)?;

        let mut items = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            match serde_json::from_slice::<MenuItem>(value.value()) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(item_id = key.value(), error = %e, "Skipping unreadable menu record");
                }
            }
        }

        Ok(items)
    }

    /// Number of menu records
    pub fn menu_len(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_TABLE)?;
        Ok(table.len()?)
    }

    /// Next free menu item id (within transaction)
    pub fn next_menu_id(&self, txn: &WriteTransaction) -> StorageResult<u32> {
        let table = txn.open_table(MENU_TABLE)?;
        let last = table.last()?.map(|(key, _)| key.value()).unwrap_or(0);
        Ok(last + 1)
    }

    // ========== Order Operations ==========

    /// Store an order (within transaction)
    pub fn put_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get an order by id
    ///
    /// `Ok(None)` means not found, distinct from a failed read.
    pub fn get_order(&self, id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(id)? {
            Some(value) => match serde_json::from_slice::<Order>(value.value()) {
                Ok(order) => Ok(Some(order)),
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "Unreadable order record, treating as missing");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Get an order by id (within transaction)
    pub fn get_order_txn(&self, txn: &WriteTransaction, id: &str) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        match table.get(id)? {
            Some(value) => match serde_json::from_slice::<Order>(value.value()) {
                Ok(order) => Ok(Some(order)),
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "Unreadable order record, treating as missing");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Get all orders
    pub fn orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            match serde_json::from_slice::<Order>(value.value()) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!(order_id = %key.value(), error = %e, "Skipping unreadable order record");
                }
            }
        }

        Ok(orders)
    }

    /// Number of order records
    pub fn order_count(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        Ok(table.len()?)
    }
}
