use std::time::Duration;

/// Collection the inventory lives in.
pub const DEFAULT_COLLECTION: &str = "productos";

/// How long a form notice stays visible.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryConfig {
    pub collection: String,
    pub notice_ttl: Duration,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}
