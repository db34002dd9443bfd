//! # bill-printer
//!
//! Bill document library - low-level document building and export only.
//!
//! ## Scope
//!
//! This crate handles HOW to produce a bill file:
//! - Fixed-width text layout building
//! - Single-page export to a named file
//!
//! Business logic (WHAT the bill contains) should stay in application
//! code: bill rendering from an order lives in the station engine.
//!
//! ## Example
//!
//! ```ignore
//! use bill_printer::{FileExporter, ReceiptBuilder};
//!
//! // Build the bill content
//! let mut builder = ReceiptBuilder::new(42);
//! builder.line_centered("Full on Cafe");
//! builder.sep_double();
//! builder.line_lr("Table", "5");
//! builder.line_lr("Total", "Rs 360");
//! builder.feed(2);
//!
//! // Save as a downloadable file
//! let exporter = FileExporter::new("/tmp/bills");
//! exporter.export("5-1700000000000", &builder.build()).await?;
//! ```

mod error;
mod export;
mod layout;

// Re-exports
pub use error::{ExportError, ExportResult};
pub use export::{FileExporter, DEFAULT_PAGE_LINES};
pub use layout::{pad_text, text_width, truncate_text, ReceiptBuilder};
