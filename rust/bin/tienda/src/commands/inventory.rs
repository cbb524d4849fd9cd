//! Commands that show the inventory: list, watch.

use anyhow::Result;
use tienda_flux::State;
use tienda_inventory::InventoryApp;
use tienda_inventory::state::Mirror;
use tokio::sync::mpsc;
use tracing::debug;

use crate::commands::{Output, session};
use crate::config::TiendaConfig;

/// Render the current inventory once.
pub fn render(app: &InventoryApp, output: Output, width: usize, breakpoint: usize) -> Result<String> {
    match output.layout(width, breakpoint) {
        Some(layout) => Ok(app.render_inventory(layout)),
        None => Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(&app.visible_records())?
        )),
    }
}

pub async fn list(
    config: &TiendaConfig,
    filter: Option<&str>,
    output: Output,
    width: usize,
) -> Result<()> {
    let mut app = session(config).await?;
    if let Some(filter) = filter {
        app.set_filter(filter).await;
    }
    print!("{}", render(&app, output, width, config.ui.card_breakpoint)?);
    app.unmount().await;
    Ok(())
}

/// Re-render after every snapshot until Ctrl-C.
pub async fn watch(
    config: &TiendaConfig,
    filter: Option<&str>,
    output: Output,
    width: usize,
) -> Result<()> {
    let mut app = session(config).await?;
    if let Some(filter) = filter {
        app.set_filter(filter).await;
    }

    let (tx, mut changed) = mpsc::unbounded_channel();
    let watcher = app.flux().watch(move |mirror: &Mirror| {
        let _ = tx.send(mirror.sequence);
    });

    print!("{}", render(&app, output, width, config.ui.card_breakpoint)?);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            sequence = changed.recv() => match sequence {
                Some(sequence) => {
                    debug!(sequence, "inventory changed");
                    println!();
                    print!("{}", render(&app, output, width, config.ui.card_breakpoint)?);
                }
                None => break,
            },
        }
    }

    app.flux().unsubscribe(Mirror::PATH, watcher);
    app.unmount().await;
    Ok(())
}
