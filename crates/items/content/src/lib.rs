//! Data-driven item content and loaders.
//!
//! Converts RON/TOML data files into the in-memory oracles and containers of
//! `item-core`:
//! - Item catalogs (RON) into [`item_core::ItemCatalog`]
//! - Map layouts (RON) into [`item_core::StaticLayout`]
//! - Item configuration (TOML) into [`item_core::ItemConfig`]
//! - Scenarios (RON) into a populated [`item_core::ItemWorld`]
//!
//! Content is static: it is loaded once and never written back.

pub mod loaders;

pub use loaders::{
    BionicSpec, CharacterSpec, ConfigLoader, ContentFactory, ItemLoader, ItemSpec, LoadResult,
    MapLoader, PartSpec, ScenarioBundle, ScenarioLoader, ScenarioSpec, TileSpec, VehicleSpec,
};
