//! CLI configuration.
//!
//! Reads/writes `~/.tienda/config.toml`. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tienda_inventory::InventoryConfig;
use tienda_inventory::config::DEFAULT_COLLECTION;

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// redb file under `data_dir`.
    Redb,
    /// Process memory; nothing survives the command.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_backend")]
    pub backend: Backend,

    /// Directory holding the redb file. `~` expands to the home directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_collection")]
    pub collection: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    /// How long the form notice stays up.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,

    /// Terminal width below which the card layout is used.
    #[serde(default = "default_card_breakpoint")]
    pub card_breakpoint: usize,
}

/// Client configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TiendaConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub ui: UiSection,
}

fn default_backend() -> Backend {
    Backend::Redb
}

fn default_data_dir() -> String {
    "~/.tienda/data".to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_notice_ttl_ms() -> u64 {
    3000
}

fn default_card_breakpoint() -> usize {
    80
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            collection: default_collection(),
        }
    }
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            notice_ttl_ms: default_notice_ttl_ms(),
            card_breakpoint: default_card_breakpoint(),
        }
    }
}

impl TiendaConfig {
    /// Default config file path: ~/.tienda/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: TiendaConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        expand_home(&self.store.data_dir)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("tienda.redb")
    }

    pub fn inventory(&self) -> InventoryConfig {
        InventoryConfig {
            collection: self.store.collection.clone(),
            notice_ttl: Duration::from_millis(self.ui.notice_ttl_ms),
        }
    }
}

fn home() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

/// Return the tienda config directory (~/.tienda).
fn dirs_path() -> PathBuf {
    home().join(".tienda")
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None if path == "~" => home(),
        None => PathBuf::from(path),
    }
}
