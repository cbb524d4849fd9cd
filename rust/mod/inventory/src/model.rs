//! Product records and their stored shape.
//!
//! Internally a product has a `sale_price` and a `supplier_price`. The stored
//! documents keep their legacy field names (`descripcion` holds the sale
//! price, `precio` the supplier price); the mapping lives in `StoredProduct`
//! and nowhere else.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tienda_docstore::{Document, Fields, StoreError};

/// One inventory product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    /// Free text; usually a decimal number.
    pub sale_price: String,
    pub has_expiry: bool,
    /// `Some` only when `has_expiry` is set.
    pub expiry_date: Option<String>,
    /// `None` when the input could not be parsed.
    pub supplier_price: Option<f64>,
    /// `None` when the input could not be parsed.
    pub quantity: Option<i64>,
}

impl Product {
    /// supplier price × quantity; an unparsable factor counts as 0.
    pub fn line_total(&self) -> f64 {
        self.supplier_price.unwrap_or(0.0) * self.quantity.unwrap_or(0) as f64
    }

    /// Fields as written to the store.
    pub fn to_fields(&self) -> Result<Fields, StoreError> {
        let value = serde_json::to_value(StoredProduct::from(self))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        match value {
            Value::Object(fields) => Ok(fields),
            other => Err(StoreError::Serialization(format!(
                "product encoded as {} instead of an object",
                other
            ))),
        }
    }

    /// Read a product back from stored fields. Missing or mistyped fields
    /// take their empty value.
    pub fn from_fields(fields: &Fields) -> Result<Self, StoreError> {
        let stored: StoredProduct = serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(stored.into())
    }
}

/// A product together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub product: Product,
}

impl Record {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        Ok(Self {
            id: doc.id.clone(),
            product: Product::from_fields(&doc.fields)?,
        })
    }

    pub fn line_total(&self) -> f64 {
        self.product.line_total()
    }
}

/// Sum of line totals.
pub fn inventory_total(records: &[Record]) -> f64 {
    records.iter().map(Record::line_total).sum()
}

// ============================================================================
// Stored shape
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredProduct {
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(rename = "descripcion", default, deserialize_with = "lenient_string")]
    sale_price: String,
    #[serde(rename = "tiene_fecha_vencimiento", default, deserialize_with = "lenient_bool")]
    has_expiry: bool,
    #[serde(rename = "fecha_vencimiento", default, deserialize_with = "lenient_date")]
    expiry_date: Option<String>,
    #[serde(rename = "precio", default, deserialize_with = "lenient_f64")]
    supplier_price: Option<f64>,
    #[serde(rename = "cantidad", default, deserialize_with = "lenient_i64")]
    quantity: Option<i64>,
}

impl From<&Product> for StoredProduct {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            sale_price: p.sale_price.clone(),
            has_expiry: p.has_expiry,
            expiry_date: if p.has_expiry { p.expiry_date.clone() } else { None },
            supplier_price: p.supplier_price.filter(|v| v.is_finite()),
            quantity: p.quantity,
        }
    }
}

impl From<StoredProduct> for Product {
    fn from(s: StoredProduct) -> Self {
        Self {
            name: s.name,
            sale_price: s.sale_price,
            has_expiry: s.has_expiry,
            expiry_date: s.expiry_date,
            supplier_price: s.supplier_price,
            quantity: s.quantity,
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
