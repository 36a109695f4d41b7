//! Content factory for building oracles and worlds from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use item_core::{ItemCatalog, ItemConfig, ItemWorld, MapOracle, StaticLayout};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, MapLoader, ScenarioLoader};

/// Everything needed to run queries against one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioBundle {
    pub catalog: ItemCatalog,
    pub layout: StaticLayout,
    pub world: ItemWorld,
}

/// Content factory that loads item content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── items.ron
/// ├── maps/
/// │   └── depot.ron
/// └── scenarios/
///     └── depot.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load item configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<ItemConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("config.toml"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path).with_context(|| format!("loading {}", path.display()))
    }

    /// Load a map layout from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<StaticLayout> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path).with_context(|| format!("loading {}", path.display()))
    }

    /// Load `scenarios/{name}.ron` together with the catalog, config and
    /// map layout it needs.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioBundle> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        let spec = ScenarioLoader::load_spec(&path)
            .with_context(|| format!("loading {}", path.display()))?;

        let config = self.load_config()?;
        let catalog = self.load_items()?;
        let layout = self.load_map(&spec.map)?;
        let world = ScenarioLoader::build(&spec, &catalog, layout.dimensions(), config)
            .with_context(|| format!("building scenario '{}'", name))?;

        Ok(ScenarioBundle {
            catalog,
            layout,
            world,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
