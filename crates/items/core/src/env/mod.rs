//! Traits describing read-only world data.
//!
//! Oracles expose static item type metadata and static map layout. The
//! containers hold the dynamic item trees; anything that does not change
//! while items move around is looked up here.
mod error;
mod items;
mod map;
mod nutrition;
mod snapshot;

pub use error::OracleError;
pub use items::{ItemOracle, ItemType};
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind, TileFlags};
pub use nutrition::{NutritionProfile, NutritionRules};
pub use snapshot::{ItemCatalog, StaticLayout};
