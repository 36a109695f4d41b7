//! Item containers and the queries built on walking them.
//!
//! `item-core` defines the item tree (items, pockets), the containers that
//! hold item trees (inventories, characters, map tiles, vehicle cargo) and
//! the [`Visitable`] capability every container implements. All derived
//! queries (amount, charges, quality, nutrition, parent lookup, removal)
//! are expressed in terms of one recursive walk, so crafting and inventory
//! systems can ask "do I have N of X" without knowing container internals.
pub mod common;
pub mod config;
pub mod containers;
pub mod env;
pub mod error;
pub mod item;
pub mod visitable;
pub mod world;

pub use common::Position;
pub use config::{ItemConfig, UpsRules};
pub use containers::{
    Bionic, CargoSlot, Character, Inventory, InventoryStack, ItemMap, MapCursor, MapSelector,
    MountedTool, PowerState, TempCraftingInventory, TileStack, TraitBonus, Vehicle, VehicleCursor,
    VehiclePart, VehicleSelector, Vehicles,
};
pub use env::{
    ItemCatalog, ItemOracle, ItemType, MapDimensions, MapOracle, NutritionProfile,
    NutritionRules, OracleError, StaticLayout, StaticTile, TerrainKind, TileFlags,
};
pub use error::{CoreError, ErrorSeverity};
pub use item::{
    Item, ItemError, ItemFlags, ItemSpawner, ItemTypeId, ItemUid, Pocket, PocketKind, QualityId,
};
pub use tree_walk::VisitResponse;
pub use visitable::{Caches, SafeItemRef, Visitable, VisitableMut, Visitor};
pub use world::{ItemWorld, WorldError};
