//! Dine Station - per-device restaurant ordering engine
//!
//! # Overview
//!
//! Everything a single ordering station needs, embedded in-process:
//!
//! - **Menu** (`menu`): seeded catalog with change broadcasts
//! - **Cart** (`cart`): session-scoped selection with quantities
//! - **Orders** (`orders`): repository, change notification, live board feed
//! - **Billing** (`billing`): bill rendering and background file export
//! - **Storage** (`storage`): embedded redb layer shared by menu and orders
//!
//! # Module structure
//!
//! ```text
//! dine-station/src/
//! ├── core/          # Configuration, station wiring
//! ├── storage.rs     # redb tables and typed access
//! ├── menu/          # Catalog store + built-in seed
//! ├── cart.rs        # Session cart
//! ├── orders/        # Repository + live feed
//! ├── billing/       # Bill renderer + export service
//! └── utils/         # Logging setup
//! ```
//!
//! State is local to one device. Orders are never deleted; the store
//! grows without bound, which is an accepted property of the design.

pub mod billing;
pub mod cart;
pub mod core;
pub mod menu;
pub mod orders;
pub mod storage;
pub mod utils;

// Re-export public types
pub use crate::billing::{BillRenderer, BillService};
pub use crate::cart::{Cart, CartItem};
pub use crate::core::{Config, Station};
pub use crate::menu::{MenuEvent, MenuStore};
pub use crate::orders::{
    sort_recent_first, LiveOrderFeed, OrderEvent, OrderRepository, DEFAULT_POLL_INTERVAL,
};
pub use crate::storage::{StationStorage, StorageError, StorageResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
