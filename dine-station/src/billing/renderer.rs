//! Bill renderer
//!
//! Deterministic mapping from an order to the fixed bill layout: one row
//! per line item, then the total. The same order always renders to the
//! same document.

use bill_printer::ReceiptBuilder;
use chrono_tz::Tz;
use shared::models::{Order, OrderStatus};

/// Currency marker shown before amounts
const CURRENCY: &str = "Rs ";

/// Bill renderer
pub struct BillRenderer {
    station_name: String,
    width: usize,
    timezone: Tz,
}

impl BillRenderer {
    /// Create a renderer with the given page width and business timezone
    pub fn new(station_name: impl Into<String>, width: usize, timezone: Tz) -> Self {
        Self {
            station_name: station_name.into(),
            width,
            timezone,
        }
    }

    /// Render an order to the bill document text
    pub fn render(&self, order: &Order) -> String {
        let mut b = ReceiptBuilder::new(self.width);

        // Header
        b.line_centered(&self.station_name);
        b.line_centered("Order Bill");
        b.sep_double();

        // Order context
        b.line_lr("Order", &order.id);
        b.line_lr("Table", &order.table_number);
        if let Some(ref order_type) = order.order_type {
            b.line_lr("Type", order_type);
        }
        b.line_lr("Placed", &self.format_timestamp(order));
        b.line_lr("Status", status_label(order.status));
        b.sep_single();

        // Line items, in order
        for item in &order.items {
            let label = format!("{} x {}", item.name, item.quantity);
            let amount = format!("{}{}", CURRENCY, item.line_total());
            b.line_lr(&label, &amount);
        }

        b.sep_single();
        b.line_lr("Total", &format!("{}{}", CURRENCY, order.total_amount));
        b.sep_double();
        b.line_centered("Thank you for your order!");
        b.feed(2);

        b.build()
    }

    fn format_timestamp(&self, order: &Order) -> String {
        order
            .created_at
            .with_timezone(&self.timezone)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::Served => "Served",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shared::models::OrderItem;

    fn sample_order() -> Order {
        Order {
            id: "5-1717260600000".to_string(),
            table_number: "5".to_string(),
            items: vec![
                OrderItem {
                    name: "Chicken Biryani".to_string(),
                    quantity: 1,
                    price: Decimal::from(180),
                },
                OrderItem {
                    name: "French Fries".to_string(),
                    quantity: 2,
                    price: Decimal::from(90),
                },
            ],
            total_amount: Decimal::from(360),
            status: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap(),
            order_type: Some("Dining".to_string()),
        }
    }

    fn renderer() -> BillRenderer {
        BillRenderer::new("Full on Cafe", 42, chrono_tz::Asia::Kolkata)
    }

    #[test]
    fn test_render_is_deterministic() {
        let order = sample_order();
        assert_eq!(renderer().render(&order), renderer().render(&order));
    }

    #[test]
    fn test_render_maps_every_line_item_and_total() {
        let doc = renderer().render(&sample_order());

        assert!(doc.contains("Full on Cafe"));
        assert!(doc.contains("5-1717260600000"));
        assert!(doc.contains("Chicken Biryani x 1"));
        assert!(doc.contains("Rs 180"));
        assert!(doc.contains("French Fries x 2"));
        // Line total for 2 x 90
        let fries_row = doc
            .lines()
            .find(|l| l.contains("French Fries"))
            .unwrap();
        assert!(fries_row.ends_with("Rs 180"));

        let total_row = doc.lines().find(|l| l.starts_with("Total")).unwrap();
        assert!(total_row.ends_with("Rs 360"));
        assert!(doc.contains("Pending"));
        assert!(doc.contains("Dining"));
    }

    #[test]
    fn test_render_uses_business_timezone() {
        // 17:30 UTC is 23:00 in Kolkata (+05:30)
        let doc = renderer().render(&sample_order());
        assert!(doc.contains("2024-06-01 23:00"));
    }

    #[test]
    fn test_render_skips_missing_order_type() {
        let mut order = sample_order();
        order.order_type = None;
        let doc = renderer().render(&order);
        assert!(!doc.contains("Type"));
    }
}
