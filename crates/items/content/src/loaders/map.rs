//! Map layout loader.
//!
//! Loads static terrain and furniture flags. Items lying on tiles are placed
//! separately via scenario files.

use std::path::Path;

use item_core::{
    MapDimensions, MapOracle, Position, StaticLayout, StaticTile, TerrainKind, TileFlags,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map layout structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
    #[serde(default)]
    flags: Vec<(i32, i32, TileFlags)>, // (x, y, furniture flags)
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map layout from a RON file.
    ///
    /// Tiles not listed are floor without flags.
    pub fn load(path: &Path) -> LoadResult<StaticLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a map layout from RON text.
    pub fn parse(content: &str) -> LoadResult<StaticLayout> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);
        let mut layout = StaticLayout::filled(dimensions, StaticTile::new(TerrainKind::Floor));

        for (x, y, terrain) in data.tiles {
            let pos = Position::new(x, y);
            let flags = layout.tile(pos).map(StaticTile::flags).unwrap_or_default();
            layout.set(pos, StaticTile::with_flags(terrain, flags))?;
        }

        for (x, y, flags) in data.flags {
            let pos = Position::new(x, y);
            let terrain = layout
                .tile(pos)
                .map_or(TerrainKind::Floor, StaticTile::terrain);
            layout.set(pos, StaticTile::with_flags(terrain, flags))?;
        }

        Ok(layout)
    }
}
