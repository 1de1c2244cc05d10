use serde::{Deserialize, Serialize};

// ============================================================================
// Product Record - Catalog/Stock Entry
// ============================================================================

/// Catalog entry owned by the product store. Stock is decremented by the
/// pipeline only after payment has succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
