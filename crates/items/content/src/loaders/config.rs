//! Item configuration loader.

use std::path::Path;

use item_core::ItemConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for item configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`ItemConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<ItemConfig> {
        let content = read_file(path)?;
        let config: ItemConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }

    /// Like [`ConfigLoader::load`], but falls back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> LoadResult<ItemConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(ItemConfig::default())
        }
    }
}
