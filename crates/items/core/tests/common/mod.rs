#![allow(dead_code)]

use item_core::{
    ItemCatalog, ItemSpawner, ItemType, ItemTypeId, Item, MapDimensions, PocketKind, StaticLayout,
    StaticTile, TerrainKind,
};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness (`RUST_LOG=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn catalog() -> ItemCatalog {
    ItemCatalog::new(vec![
        ItemType::new("jeans").with_weight(550),
        ItemType::new("tshirt").with_weight(120),
        ItemType::new("duffel")
            .with_weight(900)
            .with_pocket(PocketKind::Container),
        ItemType::new("tin")
            .with_weight(50)
            .with_pocket(PocketKind::Container),
        ItemType::new("rifle")
            .with_weight(3500)
            .with_pocket(PocketKind::Magazine),
        ItemType::new("ammo").counted_by_charges(30),
        ItemType::new("needle").with_quality("SEW", 1),
        ItemType::new("sewing_kit")
            .with_quality("SEW", 2)
            .with_pocket(PocketKind::Container),
        ItemType::new("thread").counted_by_charges(100),
        ItemType::new("apple").with_kcal(95),
    ])
}

pub fn layout(width: u32, height: u32) -> StaticLayout {
    StaticLayout::filled(
        MapDimensions::new(width, height),
        StaticTile::new(TerrainKind::Floor),
    )
}

pub fn spawn(spawner: &mut ItemSpawner, type_id: &str) -> Item {
    spawner
        .spawn_by_id(&catalog(), &ItemTypeId::from(type_id))
        .expect("test catalog defines the type")
}

pub fn type_names(items: &[&Item]) -> Vec<String> {
    items.iter().map(|i| i.type_id().to_string()).collect()
}
