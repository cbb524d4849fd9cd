pub mod init;
pub mod inventory;
pub mod product;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tienda_docstore::{DocumentStore, MemoryStore, RedbDocumentStore};
use tienda_inventory::state::Mirror;
use tienda_inventory::{InventoryApp, Layout};
use tracing::warn;

use crate::config::{Backend, TiendaConfig};

/// Width assumed when neither `--width` nor `COLUMNS` says otherwise.
const DEFAULT_WIDTH: usize = 100;

/// How long a command waits for its own write to show up in the mirror.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

pub fn open_store(config: &TiendaConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.store.backend {
        Backend::Redb => {
            std::fs::create_dir_all(config.data_dir())?;
            let store = RedbDocumentStore::open(&config.db_path())
                .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?;
            Ok(Arc::new(store))
        }
        Backend::Memory => {
            warn!("memory backend: nothing is kept after this command");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Initialized app with the inventory view mounted.
pub async fn session(config: &TiendaConfig) -> Result<InventoryApp> {
    let store = open_store(config)?;
    let mut app = InventoryApp::new(store, config.inventory());
    app.initialize().await;
    app.mount()
        .await
        .map_err(|e| anyhow::anyhow!("failed to subscribe to products: {}", e))?;
    Ok(app)
}

/// Wait until the mirror satisfies `done`, giving up after a short while.
pub async fn wait_for_mirror(app: &InventoryApp, done: impl Fn(&Mirror) -> bool) -> bool {
    let poll = async {
        while !done(&app.mirror()) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(SETTLE_TIMEOUT, poll).await.is_ok()
}

/// `--width`, then `$COLUMNS`, then a default.
pub fn terminal_width(flag: Option<usize>) -> usize {
    flag.or_else(|| std::env::var("COLUMNS").ok()?.trim().parse().ok())
        .unwrap_or(DEFAULT_WIDTH)
}

/// Output formats for commands that print the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Auto,
    Table,
    Cards,
    Json,
}

impl Output {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Output::Auto),
            "table" => Ok(Output::Table),
            "cards" => Ok(Output::Cards),
            "json" => Ok(Output::Json),
            other => anyhow::bail!("unknown output format: {} (use auto, table, cards or json)", other),
        }
    }

    /// Text layout for this format; `None` for JSON.
    pub fn layout(self, width: usize, breakpoint: usize) -> Option<Layout> {
        match self {
            Output::Auto => Some(Layout::for_width(width, breakpoint)),
            Output::Table => Some(Layout::Table),
            Output::Cards => Some(Layout::Cards),
            Output::Json => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_parse_and_layout() {
        assert_eq!(Output::parse("json").unwrap(), Output::Json);
        assert!(Output::parse("yaml").is_err());

        assert_eq!(Output::Auto.layout(60, 80), Some(Layout::Cards));
        assert_eq!(Output::Auto.layout(120, 80), Some(Layout::Table));
        assert_eq!(Output::Cards.layout(120, 80), Some(Layout::Cards));
        assert_eq!(Output::Json.layout(120, 80), None);
    }

    #[test]
    fn width_flag_wins() {
        assert_eq!(terminal_width(Some(42)), 42);
    }

    #[tokio::test]
    async fn memory_session_mounts() {
        let mut config = TiendaConfig::default();
        config.store.backend = Backend::Memory;
        let app = session(&config).await.unwrap();
        assert!(app.is_mounted());
        assert!(app.records().is_empty());
    }

    #[tokio::test]
    async fn redb_session_creates_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = TiendaConfig::default();
        config.store.data_dir = dir.path().join("data").display().to_string();

        let app = session(&config).await.unwrap();
        assert!(app.is_mounted());
        assert!(config.db_path().exists());
    }
}
