//! Item catalog loader.

use std::path::Path;

use item_core::{ItemCatalog, ItemType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemCatalogRon {
    items: Vec<ItemType>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if two definitions
    /// share an id.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an item catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let data: ItemCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let catalog = ItemCatalog::try_new(data.items)?;
        tracing::debug!("loaded {} item types", catalog.len());
        Ok(catalog)
    }
}
