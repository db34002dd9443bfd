//! Bill rendering and export
//!
//! Export is fire-and-forget: rendering and saving run on a spawned
//! task, completion is the written file, and failures are only logged.
//! There is no cancellation and no progress reporting.

mod renderer;

pub use renderer::BillRenderer;

use bill_printer::FileExporter;
use shared::models::Order;
use tokio::task::JoinHandle;

/// Bill export service
pub struct BillService {
    renderer: BillRenderer,
    exporter: FileExporter,
}

impl BillService {
    pub fn new(renderer: BillRenderer, exporter: FileExporter) -> Self {
        Self { renderer, exporter }
    }

    /// Render an order's bill without saving it
    pub fn render(&self, order: &Order) -> String {
        self.renderer.render(order)
    }

    /// Render and save the bill in the background
    ///
    /// The file name embeds the order id. Callers normally discard the
    /// returned handle; it exists so tests can await completion.
    pub fn export(&self, order: &Order) -> JoinHandle<()> {
        let document = self.renderer.render(order);
        let exporter = self.exporter.clone();
        let order_id = order.id.clone();

        tokio::spawn(async move {
            if let Err(e) = exporter.export(&order_id, &document).await {
                tracing::error!(order_id = %order_id, error = %e, "Bill export failed");
            }
        })
    }
}
