use std::fmt;
use std::str::FromStr;

use crate::model::Product;

/// An editable field of a [`ProductDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    SalePrice,
    ExpiryDate,
    SupplierPrice,
    Quantity,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Name,
        DraftField::SalePrice,
        DraftField::ExpiryDate,
        DraftField::SupplierPrice,
        DraftField::Quantity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::SalePrice => "salePrice",
            DraftField::ExpiryDate => "expiryDate",
            DraftField::SupplierPrice => "supplierPrice",
            DraftField::Quantity => "quantity",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// The raw input behind the entry form and the edit prompt.
///
/// Every value is kept exactly as typed; parsing happens in `to_product`.
/// The expiry date survives toggling the expiry switch off and on again, but
/// is dropped from the product while the switch is off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub sale_price: String,
    pub has_expiry: bool,
    pub expiry_date: String,
    pub supplier_price: String,
    pub quantity: String,
}

impl ProductDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::SalePrice => &self.sale_price,
            DraftField::ExpiryDate => &self.expiry_date,
            DraftField::SupplierPrice => &self.supplier_price,
            DraftField::Quantity => &self.quantity,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::SalePrice => self.sale_price = value,
            DraftField::ExpiryDate => self.expiry_date = value,
            DraftField::SupplierPrice => self.supplier_price = value,
            DraftField::Quantity => self.quantity = value,
        }
    }

    pub fn toggle_expiry(&mut self) {
        self.has_expiry = !self.has_expiry;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Buffer pre-filled from a stored product, for the edit prompt.
    pub fn from_product(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            sale_price: p.sale_price.clone(),
            has_expiry: p.has_expiry,
            expiry_date: p.expiry_date.clone().unwrap_or_default(),
            supplier_price: p.supplier_price.map(|v| v.to_string()).unwrap_or_default(),
            quantity: p.quantity.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    pub fn to_product(&self) -> Product {
        Product {
            name: self.name.clone(),
            sale_price: self.sale_price.clone(),
            has_expiry: self.has_expiry,
            expiry_date: if self.has_expiry && !self.expiry_date.is_empty() {
                Some(self.expiry_date.clone())
            } else {
                None
            },
            supplier_price: parse_price(&self.supplier_price),
            quantity: parse_quantity(&self.quantity),
        }
    }

    /// Live total shown beside the form; never stored.
    pub fn total_price(&self) -> f64 {
        self.to_product().line_total()
    }
}

/// Decimal price, or `None` when the text is not a finite number. The whole
/// trimmed text must parse; trailing junk is not skipped.
pub fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole quantity. A decimal is truncated toward zero.
pub fn parse_quantity(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>().ok().or_else(|| {
        parse_price(s)
            .filter(|v| v.abs() < i64::MAX as f64)
            .map(|v| v.trunc() as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductDraft {
        let mut d = ProductDraft::default();
        d.set(DraftField::Name, "Widget");
        d.set(DraftField::SalePrice, "9.99");
        d.set(DraftField::SupplierPrice, "3.50");
        d.set(DraftField::Quantity, "4");
        d
    }

    #[test]
    fn parse_price_accepts_decimals_only() {
        assert_eq!(parse_price("3.50"), Some(3.5));
        assert_eq!(parse_price(" 2 "), Some(2.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("inf"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("3.5abc"), None);
    }

    #[test]
    fn parse_quantity_truncates() {
        assert_eq!(parse_quantity("4"), Some(4));
        assert_eq!(parse_quantity("4.9"), Some(4));
        assert_eq!(parse_quantity("-2.5"), Some(-2));
        assert_eq!(parse_quantity("four"), None);
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn parse_quantity_reads_whole_text() {
        assert_eq!(parse_quantity("4abc"), None);
        assert_eq!(parse_quantity("1e3"), Some(1000));
    }

    #[test]
    fn total_price_follows_input() {
        let mut d = filled();
        assert_eq!(d.total_price(), 14.0);

        d.set(DraftField::Quantity, "x");
        assert_eq!(d.total_price(), 0.0);
    }

    #[test]
    fn to_product_parses_numbers() {
        let p = filled().to_product();
        assert_eq!(p.name, "Widget");
        assert_eq!(p.sale_price, "9.99");
        assert_eq!(p.supplier_price, Some(3.5));
        assert_eq!(p.quantity, Some(4));
        assert_eq!(p.expiry_date, None);
    }

    #[test]
    fn toggled_off_expiry_is_dropped() {
        let mut d = filled();
        d.toggle_expiry();
        d.set(DraftField::ExpiryDate, "2025-03-01");
        assert_eq!(d.to_product().expiry_date.as_deref(), Some("2025-03-01"));

        d.toggle_expiry();
        let p = d.to_product();
        assert!(!p.has_expiry);
        assert_eq!(p.expiry_date, None);
        // The typed date is kept in the buffer.
        assert_eq!(d.expiry_date, "2025-03-01");
    }

    #[test]
    fn from_product_round_trips_text() {
        let p = filled().to_product();
        let d = ProductDraft::from_product(&p);
        assert_eq!(d.supplier_price, "3.5");
        assert_eq!(d.quantity, "4");
        assert_eq!(d.to_product(), p);
    }

    #[test]
    fn field_names_parse() {
        for field in DraftField::ALL {
            assert_eq!(field.as_str().parse::<DraftField>(), Ok(field));
        }
        assert!("price".parse::<DraftField>().is_err());
    }
}
