//! File export for rendered bill documents
//!
//! Saves a rendered bill under a name that embeds the order id, so a
//! downloaded file can always be traced back to its order.

use crate::error::{ExportError, ExportResult};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Maximum lines per exported bill
///
/// There is no pagination: content taller than a single page is truncated
/// and a diagnostic is emitted.
pub const DEFAULT_PAGE_LINES: usize = 64;

/// Bill file exporter
///
/// Writes rendered documents into a fixed export directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    export_dir: PathBuf,
    page_lines: usize,
}

impl FileExporter {
    /// Create a new exporter writing into the given directory
    pub fn new(export_dir: impl AsRef<Path>) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
            page_lines: DEFAULT_PAGE_LINES,
        }
    }

    /// Override the single-page line capacity
    pub fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines;
        self
    }

    /// Get the export directory
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// File name for an order's bill
    pub fn file_name(order_id: &str) -> String {
        format!("bill-{}.txt", order_id)
    }

    /// Save a rendered document, returning the written path
    ///
    /// Content beyond the page capacity is dropped; only a diagnostic is
    /// emitted (no pagination).
    #[instrument(skip(self, document), fields(order_id = %order_id))]
    pub async fn export(&self, order_id: &str, document: &str) -> ExportResult<PathBuf> {
        if order_id.is_empty() {
            return Err(ExportError::InvalidConfig(
                "order id must not be empty".to_string(),
            ));
        }

        let contents = self.fit_to_page(order_id, document);

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self.export_dir.join(Self::file_name(order_id));
        tokio::fs::write(&path, contents.as_bytes()).await?;

        info!(path = %path.display(), bytes = contents.len(), "Bill exported");
        Ok(path)
    }

    /// Truncate the document to the single-page capacity
    fn fit_to_page(&self, order_id: &str, document: &str) -> String {
        let total = document.lines().count();
        if total <= self.page_lines {
            return document.to_string();
        }

        warn!(
            order_id = %order_id,
            total_lines = total,
            page_lines = self.page_lines,
            "Bill content exceeds one page, truncating"
        );

        let mut out: String = document
            .lines()
            .take(self.page_lines)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }
}
