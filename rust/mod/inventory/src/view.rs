use chrono::{DateTime, Local};
use serde::Serialize;

use crate::format::{format_date, format_quantity, format_soles, or_dash};
use crate::model::Record;
use crate::state::Mirror;

/// Case-insensitive substring match on the product name. An empty filter
/// matches everything.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    filter.is_empty() || name.to_lowercase().contains(&filter.to_lowercase())
}

/// One displayed row, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    pub name: String,
    pub sale_price: String,
    pub expiry: String,
    pub supplier_price: String,
    pub quantity: String,
    pub total: String,
}

impl Row {
    fn from_record(record: &Record) -> Self {
        let p = &record.product;
        Self {
            id: record.id.clone(),
            name: or_dash(&p.name),
            sale_price: or_dash(&p.sale_price),
            expiry: format_date(p.expiry_date.as_deref()),
            supplier_price: format_soles(p.supplier_price),
            quantity: format_quantity(p.quantity),
            total: format_soles(Some(record.line_total())),
        }
    }
}

/// Everything the inventory layouts show, derived from the mirror and the
/// filter on each render.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    pub rows: Vec<Row>,
    /// Over the whole mirror, not just `rows`.
    pub total: f64,
    /// Records in the mirror.
    pub count: usize,
    pub filter: String,
    pub updated_at: Option<DateTime<Local>>,
}

impl InventoryView {
    pub fn build(mirror: &Mirror, filter: &str) -> Self {
        Self {
            rows: mirror
                .records
                .iter()
                .filter(|r| matches_filter(&r.product.name, filter))
                .map(Row::from_record)
                .collect(),
            total: mirror.total(),
            count: mirror.records.len(),
            filter: filter.to_string(),
            updated_at: mirror.updated_at,
        }
    }

    pub fn total_label(&self) -> String {
        format_soles(Some(self.total))
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn record(id: &str, name: &str, price: f64, qty: i64) -> Record {
        Record {
            id: id.into(),
            product: Product {
                name: name.into(),
                sale_price: "1".into(),
                supplier_price: Some(price),
                quantity: Some(qty),
                ..Product::default()
            },
        }
    }

    fn mirror() -> Mirror {
        Mirror {
            records: vec![
                record("a", "Widget", 3.5, 4),
                record("b", "Gadget", 2.0, 5),
                record("c", "WIDGET large", 1.0, 1),
            ],
            ..Mirror::default()
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        assert!(matches_filter("Widget", "wid"));
        assert!(matches_filter("Widget", "GET"));
        assert!(matches_filter("Widget", ""));
        assert!(!matches_filter("Widget", "gadget"));
    }

    #[test]
    fn filtered_rows_keep_full_total() {
        let view = InventoryView::build(&mirror(), "widget");
        let ids: Vec<&str> = view.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(view.total, 25.0);
        assert_eq!(view.count, 3);
        assert!(view.is_filtered());
    }

    #[test]
    fn filter_without_match_is_empty() {
        let view = InventoryView::build(&mirror(), "zzz");
        assert!(view.rows.is_empty());
        assert_eq!(view.total_label(), "S/ 25.00");
    }

    #[test]
    fn row_formatting() {
        let mut r = record("a", "Widget", 3.5, 4);
        r.product.has_expiry = true;
        r.product.expiry_date = Some("2025-03-01".into());
        let row = Row::from_record(&r);
        assert_eq!(row.supplier_price, "S/ 3.50");
        assert_eq!(row.total, "S/ 14.00");
        assert_eq!(row.expiry, "1/3/2025");
        assert_eq!(row.quantity, "4");

        let empty = Row::from_record(&Record {
            id: "z".into(),
            product: Product::default(),
        });
        assert_eq!(empty.name, "-");
        assert_eq!(empty.total, "-");
        assert_eq!(empty.quantity, "0");
        assert_eq!(empty.expiry, "-");
    }
}
