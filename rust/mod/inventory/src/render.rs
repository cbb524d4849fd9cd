//! Text layouts for the form and the inventory view.
//!
//! The table and the card layout are built from the same `InventoryView` and
//! show the same data and the same per-record controls.

use std::fmt::{self, Write};

use crate::draft::ProductDraft;
use crate::format::format_soles;
use crate::state::{FormPhase, FormState, NoticeKind, ViewModal};
use crate::view::{InventoryView, Row};

pub const EMPTY_MESSAGE: &str = "No products registered";
pub const NO_MATCH_MESSAGE: &str = "No products match the filter";
pub const CONTROLS: &str = "[edit] [delete]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Table,
    Cards,
}

impl Layout {
    /// Cards below `breakpoint` columns, table otherwise.
    pub fn for_width(width: usize, breakpoint: usize) -> Self {
        if width < breakpoint {
            Layout::Cards
        } else {
            Layout::Table
        }
    }
}

/// Run a writer against a fresh `String`. Writing to a `String` never fails.
fn collect(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    let _ = write(&mut out);
    out
}

pub fn render_inventory(view: &InventoryView, layout: Layout) -> String {
    collect(|out| write_inventory(out, view, layout))
}

fn write_inventory(out: &mut impl Write, view: &InventoryView, layout: Layout) -> fmt::Result {
    writeln!(out, "Inventory total: {}", view.total_label())?;
    writeln!(out, "Total value in soles (PEN)")?;
    writeln!(out)?;
    writeln!(out, "Products ({} registered)", view.count)?;
    if view.is_filtered() {
        writeln!(out, "Filter: {:?} ({} shown)", view.filter, view.rows.len())?;
    }
    writeln!(out)?;

    if view.rows.is_empty() {
        let message = if view.count > 0 { NO_MATCH_MESSAGE } else { EMPTY_MESSAGE };
        writeln!(out, "{}", message)?;
    } else {
        match layout {
            Layout::Table => write_table(out, &view.rows)?,
            Layout::Cards => write_cards(out, &view.rows)?,
        }
    }

    if let Some(at) = view.updated_at {
        writeln!(out)?;
        writeln!(out, "Last updated: {}", at.format("%H:%M:%S"))?;
    }
    Ok(())
}

const HEADERS: [&str; 8] = [
    "ID",
    "NAME",
    "SALE PRICE",
    "EXPIRY",
    "SUPPLIER PRICE",
    "QTY",
    "TOTAL",
    "ACTIONS",
];

fn cells(row: &Row) -> [&str; 8] {
    [
        row.id.as_str(),
        row.name.as_str(),
        row.sale_price.as_str(),
        row.expiry.as_str(),
        row.supplier_price.as_str(),
        row.quantity.as_str(),
        row.total.as_str(),
        CONTROLS,
    ]
}

fn write_table(out: &mut impl Write, rows: &[Row]) -> fmt::Result {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(cells(row)) {
            *w = (*w).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS, &widths)?;
    for row in rows {
        write_line(out, &cells(row), &widths)?;
    }
    Ok(())
}

fn write_line(out: &mut impl Write, cells: &[&str; 8], widths: &[usize; 8]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

fn write_cards(out: &mut impl Write, rows: &[Row]) -> fmt::Result {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}  ({})", row.name, row.id)?;
        writeln!(out, "  Sale price:     {}", row.sale_price)?;
        writeln!(out, "  Expiry:         {}", row.expiry)?;
        writeln!(out, "  Supplier price: {}", row.supplier_price)?;
        writeln!(out, "  Quantity:       {} units", row.quantity)?;
        writeln!(out, "  Total:          {}", row.total)?;
        writeln!(out, "  {}", CONTROLS)?;
    }
    Ok(())
}

/// The entry form with its live total and notice.
pub fn render_form(form: &FormState) -> String {
    collect(|out| write_form(out, form))
}

fn write_form(out: &mut impl Write, form: &FormState) -> fmt::Result {
    let d = &form.draft;
    writeln!(out, "Product registration")?;
    if let Some(notice) = form.notice() {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        writeln!(out, "[{}] {}", tag, notice.message)?;
    }
    writeln!(out, "  Name:           {}", d.name)?;
    writeln!(out, "  Sale price:     S/ {}", d.sale_price)?;
    write_expiry(out, d)?;
    writeln!(out, "  Quantity:       {}", d.quantity)?;
    writeln!(out, "  Supplier price: S/ {}", d.supplier_price)?;
    writeln!(out, "  Total price:    S/ {:.2}", form.total_price())?;
    let submit = match form.phase {
        FormPhase::Submitting => "[saving...]",
        _ => "[save]",
    };
    writeln!(out, "  {}", submit)
}

fn write_expiry(out: &mut impl Write, d: &ProductDraft) -> fmt::Result {
    writeln!(out, "  Has expiry:     {}", if d.has_expiry { "yes" } else { "no" })?;
    if d.has_expiry {
        writeln!(out, "  Expiry date:    {}", d.expiry_date)?;
    }
    Ok(())
}

/// The open prompt, or an empty string when none is open.
pub fn render_modal(modal: &ViewModal) -> String {
    collect(|out| write_modal(out, modal))
}

fn write_modal(out: &mut impl Write, modal: &ViewModal) -> fmt::Result {
    match modal {
        ViewModal::Closed => Ok(()),
        ViewModal::ConfirmingDelete { id, pending } => {
            writeln!(out, "Delete product {}?", id)?;
            writeln!(out, "  This cannot be undone.")?;
            writeln!(out, "  {}", if *pending { "[deleting...]" } else { "[cancel] [delete]" })
        }
        ViewModal::Editing {
            original,
            buffer,
            pending,
        } => {
            writeln!(out, "Edit product {}", original.id)?;
            writeln!(out, "  Name:           {}", buffer.name)?;
            writeln!(out, "  Sale price:     S/ {}", buffer.sale_price)?;
            write_expiry(out, buffer)?;
            writeln!(out, "  Supplier price: S/ {}", buffer.supplier_price)?;
            writeln!(out, "  Quantity:       {}", buffer.quantity)?;
            writeln!(out, "  Total:          {}", format_soles(Some(buffer.total_price())))?;
            writeln!(out, "  {}", if *pending { "[saving...]" } else { "[cancel] [save]" })
        }
    }
}

pub fn render_error(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("[error] {}\n", message),
        None => String::new(),
    }
}
