//! Shared types for the tableside ordering workspace
//!
//! Domain models, the unified error type, and small utilities used by
//! both the station engine and the bill printer.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult};
pub use serde::{Deserialize, Serialize};
