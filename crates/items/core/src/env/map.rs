use bitflags::bitflags;

use crate::common::Position;

/// Static map oracle exposing immutable layout information.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    /// Returns true when `position` has every flag in `flags`.
    fn has_flags(&self, position: Position, flags: TileFlags) -> bool {
        self.tile(position)
            .map(|tile| tile.flags().contains(flags))
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && i64::from(position.x) < i64::from(self.width)
            && i64::from(position.y) < i64::from(self.height)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

bitflags! {
    /// Static furniture/terrain properties relevant to item access.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TileFlags: u8 {
        /// Items on this tile are closed off (e.g. a sealed crate).
        const SEALED     = 1 << 0;
        /// Tile holds liquids; its items stay reachable even when sealed.
        const LIQUIDCONT = 1 << 1;
        /// Furniture that stores items (lockers, shelves).
        const CONTAINER  = 1 << 2;
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
    #[cfg_attr(feature = "serde", serde(default))]
    flags: TileFlags,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            flags: TileFlags::empty(),
        }
    }

    pub const fn with_flags(terrain: TerrainKind, flags: TileFlags) -> Self {
        Self { terrain, flags }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn flags(self) -> TileFlags {
        self.flags
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }

    /// Items here are invisible to traversal: sealed and not a liquid container.
    pub fn hides_items(self) -> bool {
        self.flags.contains(TileFlags::SEALED) && !self.flags.contains(TileFlags::LIQUIDCONT)
    }

    /// Whether a character standing nearby can reach items here.
    pub fn is_accessible(self) -> bool {
        self.is_passable() || self.flags.contains(TileFlags::CONTAINER)
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Void,
    Water,
    Custom(u16),
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sealed_liquid_container_still_exposes_items() {
        let crate_tile = StaticTile::with_flags(TerrainKind::Floor, TileFlags::SEALED);
        let tank = StaticTile::with_flags(
            TerrainKind::Floor,
            TileFlags::SEALED | TileFlags::LIQUIDCONT,
        );
        assert!(crate_tile.hides_items());
        assert!(!tank.hides_items());
    }

    #[test]
    fn container_furniture_is_accessible_through_walls() {
        let locker = StaticTile::with_flags(TerrainKind::Wall, TileFlags::CONTAINER);
        assert!(locker.is_accessible());
        assert!(!StaticTile::new(TerrainKind::Wall).is_accessible());
    }

    #[test]
    fn contains_handles_dimensions_beyond_i32() {
        let huge = MapDimensions::new(u32::MAX, u32::MAX);
        assert!(huge.contains(Position::new(i32::MAX, 0)));
        assert!(huge.contains(Position::ORIGIN));
        assert!(!huge.contains(Position::new(-1, 0)));

        let small = MapDimensions::new(2, 3);
        assert!(small.contains(Position::new(1, 2)));
        assert!(!small.contains(Position::new(2, 0)));
    }
}
