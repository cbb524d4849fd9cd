//! Commands that write one product: add, edit, delete.

use std::io::BufRead;

use anyhow::Result;
use tienda_inventory::state::{NoticeKind, ViewModal};
use tienda_inventory::{DraftField, InventoryApp, render};

use crate::commands::{session, wait_for_mirror};
use crate::config::TiendaConfig;

/// Field values given on the command line. `None` leaves a field as is.
#[derive(Debug, Default)]
pub struct FieldArgs {
    pub name: Option<String>,
    pub sale_price: Option<String>,
    pub supplier_price: Option<String>,
    pub quantity: Option<String>,
    pub expiry: Option<String>,
    pub no_expiry: bool,
}

impl FieldArgs {
    fn values(&self) -> [(DraftField, Option<&String>); 4] {
        [
            (DraftField::Name, self.name.as_ref()),
            (DraftField::SalePrice, self.sale_price.as_ref()),
            (DraftField::SupplierPrice, self.supplier_price.as_ref()),
            (DraftField::Quantity, self.quantity.as_ref()),
        ]
    }

    /// Reject blank values. With `all_required`, the four form fields must
    /// be given as well.
    pub fn validate(&self, all_required: bool) -> Result<()> {
        for (field, value) in self.values() {
            match value {
                Some(v) if v.trim().is_empty() => {
                    anyhow::bail!("--{} must not be empty.", flag(field))
                }
                None if all_required => anyhow::bail!("--{} is required.", flag(field)),
                _ => {}
            }
        }
        if self.expiry.as_ref().is_some_and(|d| d.trim().is_empty()) {
            anyhow::bail!("--expiry must not be empty.");
        }
        Ok(())
    }
}

fn flag(field: DraftField) -> &'static str {
    match field {
        DraftField::Name => "name",
        DraftField::SalePrice => "sale-price",
        DraftField::SupplierPrice => "supplier-price",
        DraftField::Quantity => "quantity",
        DraftField::ExpiryDate => "expiry",
    }
}

/// Fill the entry form and submit it.
pub async fn add(config: &TiendaConfig, fields: &FieldArgs) -> Result<()> {
    fields.validate(true)?;
    let mut app = session(config).await?;
    let before: Vec<String> = app.records().into_iter().map(|r| r.id).collect();

    for (field, value) in fields.values() {
        if let Some(value) = value {
            app.form_set(field, value.as_str()).await;
        }
    }
    if let Some(date) = &fields.expiry {
        app.form_toggle_expiry().await;
        app.form_set(DraftField::ExpiryDate, date.as_str()).await;
    }
    let total = app.form().total_price();

    app.submit().await;
    let form = app.form();
    let notice = form
        .notice()
        .ok_or_else(|| anyhow::anyhow!("form finished without a notice"))?;
    if notice.kind == NoticeKind::Error {
        app.unmount().await;
        anyhow::bail!("{}", notice.message);
    }

    println!("{}", notice.message);
    let new_id = |app: &InventoryApp| {
        app.records()
            .into_iter()
            .map(|r| r.id)
            .find(|id| !before.contains(id))
    };
    if wait_for_mirror(&app, |m| m.records.iter().any(|r| !before.contains(&r.id))).await {
        if let Some(id) = new_id(&app) {
            println!("  id:    {}", id);
        }
    }
    println!("  total: S/ {:.2}", total);

    app.unmount().await;
    Ok(())
}

/// Open the edit prompt on `id`, apply the given fields and confirm.
pub async fn edit(config: &TiendaConfig, id: &str, fields: &FieldArgs) -> Result<()> {
    fields.validate(false)?;
    let mut app = session(config).await?;
    app.open_edit(id).await;
    let ViewModal::Editing { buffer, .. } = app.modal() else {
        app.unmount().await;
        anyhow::bail!(
            "{}",
            app.error().unwrap_or_else(|| format!("Product {} not found", id))
        );
    };

    for (field, value) in fields.values() {
        if let Some(value) = value {
            app.edit_set(field, value.as_str()).await;
        }
    }
    if let Some(date) = &fields.expiry {
        if !buffer.has_expiry {
            app.edit_toggle_expiry().await;
        }
        app.edit_set(DraftField::ExpiryDate, date.as_str()).await;
    } else if fields.no_expiry && buffer.has_expiry {
        app.edit_toggle_expiry().await;
    }

    let sequence = app.mirror().sequence;
    app.confirm_edit().await;
    if let Some(error) = app.error() {
        app.cancel_edit().await;
        app.unmount().await;
        anyhow::bail!("{}", error);
    }

    println!("Product {} updated.", id);
    if wait_for_mirror(&app, |m| m.sequence > sequence).await {
        if let Some(record) = app.mirror().find(id) {
            println!(
                "  {}  qty {}  total S/ {:.2}",
                record.product.name,
                record.product.quantity.unwrap_or(0),
                record.line_total()
            );
        }
    }

    app.unmount().await;
    Ok(())
}

/// Open the delete prompt on `id`, ask unless `yes`, then confirm or cancel.
pub async fn delete(config: &TiendaConfig, id: &str, yes: bool) -> Result<()> {
    let mut app = session(config).await?;
    if app.mirror().find(id).is_none() {
        app.unmount().await;
        anyhow::bail!("Product {} not found", id);
    }

    app.open_delete(id).await;
    if !yes {
        eprint!("{}", render::render_modal(&app.modal()));
        eprint!("Are you sure? [y/N]: ");
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            app.cancel_delete().await;
            app.unmount().await;
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.confirm_delete().await;
    if let Some(error) = app.error() {
        app.cancel_delete().await;
        app.unmount().await;
        anyhow::bail!("{}", error);
    }

    println!("Product {} deleted.", id);
    app.unmount().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;

    fn redb_config(dir: &tempfile::TempDir) -> TiendaConfig {
        let mut config = TiendaConfig::default();
        config.store.backend = Backend::Redb;
        config.store.data_dir = dir.path().display().to_string();
        config
    }

    fn widget() -> FieldArgs {
        FieldArgs {
            name: Some("Widget".into()),
            sale_price: Some("9.99".into()),
            supplier_price: Some("3.50".into()),
            quantity: Some("4".into()),
            ..FieldArgs::default()
        }
    }

    async fn only_record(config: &TiendaConfig) -> tienda_inventory::Record {
        let mut app = session(config).await.unwrap();
        let records = app.records();
        app.unmount().await;
        assert_eq!(records.len(), 1);
        records.into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn add_edit_delete_round() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = redb_config(&dir);

        add(&config, &widget()).await.unwrap();
        let record = only_record(&config).await;
        assert_eq!(record.line_total(), 14.0);

        let change = FieldArgs {
            quantity: Some("10".into()),
            expiry: Some("2025-03-01".into()),
            ..FieldArgs::default()
        };
        edit(&config, &record.id, &change).await.unwrap();
        let edited = only_record(&config).await;
        assert_eq!(edited.product.quantity, Some(10));
        assert_eq!(edited.product.name, "Widget");
        assert_eq!(edited.product.expiry_date.as_deref(), Some("2025-03-01"));

        let clear = FieldArgs {
            no_expiry: true,
            ..FieldArgs::default()
        };
        edit(&config, &record.id, &clear).await.unwrap();
        assert_eq!(only_record(&config).await.product.expiry_date, None);

        delete(&config, &record.id, true).await.unwrap();
        let mut app = session(&config).await.unwrap();
        assert!(app.records().is_empty());
        app.unmount().await;
    }

    #[tokio::test]
    async fn unknown_ids_fail() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = redb_config(&dir);

        assert!(edit(&config, "missing", &widget()).await.is_err());
        assert!(delete(&config, "missing", true).await.is_err());
    }

    #[tokio::test]
    async fn add_with_blank_fields_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = redb_config(&dir);

        let blank_name = FieldArgs {
            name: Some(String::new()),
            ..widget()
        };
        let missing_quantity = FieldArgs {
            quantity: None,
            ..widget()
        };
        let blank_expiry = FieldArgs {
            expiry: Some("  ".into()),
            ..widget()
        };
        for fields in [blank_name, missing_quantity, blank_expiry] {
            assert!(add(&config, &fields).await.is_err());
        }

        let mut app = session(&config).await.unwrap();
        assert!(app.records().is_empty());
        app.unmount().await;
    }

    #[tokio::test]
    async fn edit_rejects_blank_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = redb_config(&dir);
        add(&config, &widget()).await.unwrap();
        let record = only_record(&config).await;

        let blank = FieldArgs {
            sale_price: Some(String::new()),
            ..FieldArgs::default()
        };
        let err = edit(&config, &record.id, &blank).await.unwrap_err();
        assert!(err.to_string().contains("--sale-price"));
        assert_eq!(only_record(&config).await.product.sale_price, "9.99");
    }

    #[test]
    fn validate_requires_form_fields_only_for_add() {
        let partial = FieldArgs {
            quantity: Some("10".into()),
            ..FieldArgs::default()
        };
        assert!(partial.validate(false).is_ok());
        let err = partial.validate(true).unwrap_err();
        assert_eq!(err.to_string(), "--name is required.");
        assert!(widget().validate(true).is_ok());
    }
}
