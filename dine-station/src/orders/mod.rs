//! Orders, placement, persistence, change notification, live board feed
//!
//! The repository owns the persisted order records and a broadcast
//! channel of change notifications. The live feed keeps the staff
//! board's working copy current, using notifications as the primary
//! signal and a fixed-interval re-read as fallback.

mod feed;
mod repository;

pub use feed::{sort_recent_first, LiveOrderFeed, DEFAULT_POLL_INTERVAL};
pub use repository::{OrderEvent, OrderRepository};
