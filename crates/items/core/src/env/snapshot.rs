//! In-memory oracle implementations.
//!
//! - [`ItemCatalog`]: item types keyed by id
//! - [`StaticLayout`]: row-major static tiles
//!
//! Loaders build these from data files; tests build them directly.

use std::collections::BTreeMap;

use super::{ItemOracle, ItemType, MapDimensions, MapOracle, OracleError, StaticTile};
use crate::common::Position;
use crate::item::ItemTypeId;

/// Item type definitions keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemCatalog {
    types: BTreeMap<ItemTypeId, ItemType>,
}

impl ItemCatalog {
    /// Builds a catalog; later definitions replace earlier ones with the same id.
    pub fn new(types: Vec<ItemType>) -> Self {
        Self {
            types: types.into_iter().map(|ty| (ty.id.clone(), ty)).collect(),
        }
    }

    /// Builds a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DuplicateType` for the first repeated id.
    pub fn try_new(types: Vec<ItemType>) -> Result<Self, OracleError> {
        let mut catalog = Self::default();
        for ty in types {
            if catalog.types.contains_key(&ty.id) {
                return Err(OracleError::DuplicateType(ty.id));
            }
            catalog.types.insert(ty.id.clone(), ty);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, ty: ItemType) -> Option<ItemType> {
        self.types.insert(ty.id.clone(), ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, id: &ItemTypeId) -> Option<&ItemType> {
        self.types.get(id)
    }

    fn all_definitions(&self) -> Vec<&ItemType> {
        self.types.values().collect()
    }
}

/// Static tiles stored in a flat row-major array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLayout {
    dimensions: MapDimensions,
    tiles: Vec<Option<StaticTile>>,
}

impl StaticLayout {
    /// Creates a layout where every tile is `tile`.
    pub fn filled(dimensions: MapDimensions, tile: StaticTile) -> Self {
        Self {
            dimensions,
            tiles: vec![Some(tile); dimensions.area()],
        }
    }

    /// Creates a layout from row-major tile data.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TileCountMismatch` if `tiles` does not cover
    /// exactly `width * height` positions.
    pub fn from_tiles(
        dimensions: MapDimensions,
        tiles: Vec<Option<StaticTile>>,
    ) -> Result<Self, OracleError> {
        if tiles.len() != dimensions.area() {
            return Err(OracleError::TileCountMismatch {
                expected: dimensions.area(),
                actual: tiles.len(),
            });
        }
        Ok(Self { dimensions, tiles })
    }

    /// Replaces the tile at `position`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PositionOutOfBounds` outside the layout.
    pub fn set(&mut self, position: Position, tile: StaticTile) -> Result<(), OracleError> {
        let idx = self
            .index(position)
            .ok_or(OracleError::PositionOutOfBounds(position))?;
        self.tiles[idx] = Some(tile);
        Ok(())
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl MapOracle for StaticLayout {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.index(position).and_then(|idx| self.tiles[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{TerrainKind, TileFlags};

    #[test]
    fn catalog_rejects_duplicates() {
        let err = ItemCatalog::try_new(vec![ItemType::new("rag"), ItemType::new("rag")]);
        assert_eq!(
            err.unwrap_err(),
            OracleError::DuplicateType(ItemTypeId::from("rag"))
        );
    }

    #[test]
    fn layout_lookup_is_row_major() {
        let mut layout = StaticLayout::filled(
            MapDimensions::new(3, 2),
            StaticTile::new(TerrainKind::Floor),
        );
        let sealed = StaticTile::with_flags(TerrainKind::Floor, TileFlags::SEALED);
        layout.set(Position::new(2, 1), sealed).unwrap();

        assert_eq!(layout.tile(Position::new(2, 1)), Some(sealed));
        assert!(layout.has_flags(Position::new(2, 1), TileFlags::SEALED));
        assert!(!layout.has_flags(Position::new(1, 1), TileFlags::SEALED));
        assert_eq!(layout.tile(Position::new(3, 0)), None);
        assert!(layout.set(Position::new(-1, 0), sealed).is_err());
    }

    #[test]
    fn from_tiles_checks_length() {
        let err = StaticLayout::from_tiles(MapDimensions::new(2, 2), vec![None; 3]);
        assert_eq!(
            err.unwrap_err(),
            OracleError::TileCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }
}
