//! Loader tests against temporary files and the bundled data directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use item_content::{ConfigLoader, ContentFactory, ItemLoader, MapLoader};
use item_core::{
    ItemConfig, ItemOracle, ItemTypeId, MapOracle, NutritionProfile, Position, PocketKind,
    QualityId, TerrainKind, TileFlags, Visitable, VisitableMut,
};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn bundled_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

// ============================================================================
// Individual loaders
// ============================================================================

#[test]
fn item_catalog_round_trips_from_ron() {
    let file = write_temp(
        r#"(
            items: [
                (id: "tin", weight: 50, pockets: [Container]),
                (id: "thread", count_by_charges: true, initial_charges: 25),
                (id: "awl", qualities: {"SEW": 1}),
            ],
        )"#,
    );

    let catalog = ItemLoader::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 3);

    let tin = catalog.definition(&ItemTypeId::from("tin")).unwrap();
    assert_eq!(tin.pockets.as_slice(), [PocketKind::Container]);
    let thread = catalog.definition(&ItemTypeId::from("thread")).unwrap();
    assert!(thread.count_by_charges);
    assert_eq!(thread.initial_charges, 25);
    let awl = catalog.definition(&ItemTypeId::from("awl")).unwrap();
    assert_eq!(awl.quality(&QualityId::from("SEW")), Some(1));
}

#[test]
fn duplicate_item_ids_are_rejected() {
    let err = ItemLoader::parse(r#"(items: [(id: "tin"), (id: "tin")])"#).unwrap_err();
    assert!(err.to_string().contains("duplicate item type 'tin'"));
}

#[test]
fn malformed_catalog_reports_parse_error() {
    let err = ItemLoader::parse("(items: [").unwrap_err();
    assert!(err.to_string().contains("Failed to parse item catalog RON"));
}

#[test]
fn map_layout_applies_terrain_and_flags() {
    let layout = MapLoader::parse(
        r#"(
            dimensions: (4, 3),
            tiles: [(1, 1, Wall)],
            flags: [(1, 1, "CONTAINER"), (2, 2, "SEALED | LIQUIDCONT")],
        )"#,
    )
    .unwrap();

    assert_eq!(layout.dimensions().width, 4);
    let locker = layout.tile(Position::new(1, 1)).unwrap();
    assert_eq!(locker.terrain(), TerrainKind::Wall);
    assert!(locker.is_accessible());
    assert!(layout.has_flags(Position::new(2, 2), TileFlags::SEALED | TileFlags::LIQUIDCONT));
    assert!(!layout.tile(Position::new(2, 2)).unwrap().hides_items());
    assert_eq!(layout.tile(Position::new(0, 0)).unwrap().terrain(), TerrainKind::Floor);
}

#[test]
fn map_flags_outside_bounds_fail() {
    assert!(MapLoader::parse(r#"(dimensions: (2, 2), flags: [(5, 5, "SEALED")])"#).is_err());
}

#[test]
fn config_keeps_defaults_for_missing_keys() {
    let file = write_temp("selector_radius = 4\n");
    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.selector_radius, 4);
    assert_eq!(config.ups, ItemConfig::default().ups);

    let missing = ConfigLoader::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
    assert_eq!(missing, ItemConfig::default());
}

#[test]
fn scenario_errors_name_the_failing_entity() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("maps")).unwrap();
    std::fs::create_dir_all(dir.path().join("scenarios")).unwrap();
    std::fs::write(dir.path().join("items.ron"), r#"(items: [(id: "rock")])"#).unwrap();
    std::fs::write(dir.path().join("maps/yard.ron"), "(dimensions: (3, 3))").unwrap();
    std::fs::write(
        dir.path().join("scenarios/bad.ron"),
        r#"(map: "yard", characters: [(name: "Kim", position: (x: 0, y: 0), worn: [(type_id: "ghost")])])"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path())
        .load_scenario("bad")
        .unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("building character 'Kim'"));
    assert!(chain.contains("unknown item type 'ghost'"));
}

#[test]
fn scenario_rejects_items_outside_the_map() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("maps")).unwrap();
    std::fs::create_dir_all(dir.path().join("scenarios")).unwrap();
    std::fs::write(dir.path().join("items.ron"), r#"(items: [(id: "rock")])"#).unwrap();
    std::fs::write(dir.path().join("maps/yard.ron"), "(dimensions: (3, 3))").unwrap();
    std::fs::write(
        dir.path().join("scenarios/far.ron"),
        r#"(map: "yard", tiles: [(position: (x: 7, y: 1), items: [(type_id: "rock")])])"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path())
        .load_scenario("far")
        .unwrap_err();
    assert!(format!("{err:#}").contains("outside the map"));
}

// ============================================================================
// Bundled depot scenario
// ============================================================================

#[test]
fn depot_scenario_loads_and_answers_queries() {
    let bundle = ContentFactory::new(bundled_data())
        .load_scenario("depot")
        .unwrap();
    let world = &bundle.world;
    let survivor = world.character("survivor").unwrap();

    // Weapon, then backpack (outermost) and its contents, then the tshirt.
    let order: Vec<_> = survivor
        .all_items()
        .iter()
        .map(|i| i.type_id().to_string())
        .collect();
    assert_eq!(
        order,
        [
            "hammer",
            "backpack",
            "sewing_kit",
            "needle",
            "thread",
            "apple",
            "tshirt",
            "apple",
            "adv_UPS_off",
        ]
    );

    // 120 advanced charges scale to 200, plus 50 kJ through the bionic UPS.
    assert_eq!(survivor.charges_of(&ItemTypeId::UPS, 10_000), 250);

    let items = &bundle.catalog;
    assert_eq!(survivor.max_quality(items, &QualityId::from("SEW")), Some(2));
    assert_eq!(survivor.max_quality(items, &QualityId::from("SAW_W")), Some(2));
    assert_eq!(survivor.max_quality(items, &QualityId::from("WELD")), Some(4));
    assert_eq!(
        survivor.kcal_range(items, &ItemTypeId::from("apple"), &|_| true, &NutritionProfile::default()),
        Some((47, 95))
    );

    let sealed = world.map.cursor(&bundle.layout, Position::new(5, 3));
    assert!(sealed.all_items().is_empty());
}

#[test]
fn depot_crafting_inventory_reaches_nearby_storage() {
    let bundle = ContentFactory::new(bundled_data())
        .load_scenario("depot")
        .unwrap();
    let crafting = bundle
        .world
        .crafting_inventory(&bundle.layout, "survivor")
        .unwrap();

    assert_eq!(crafting.amount_of(&ItemTypeId::from("jeans"), false, 10), 5);
    assert_eq!(crafting.amount_of(&ItemTypeId::from("hammer"), false, 10), 2);
    assert_eq!(crafting.charges_of(&ItemTypeId::from("UPS_off"), 1000), 300);
    assert_eq!(crafting.amount_of(&ItemTypeId::from("apple"), false, 10), 2);
}

#[test]
fn depot_map_removal_updates_tile_caches() {
    let mut bundle = ContentFactory::new(bundled_data())
        .load_scenario("depot")
        .unwrap();
    let lit = Position::new(2, 3);
    assert_eq!(bundle.world.map.tile(lit).map(|t| t.luminosity()), Some(20));

    let removed = bundle
        .world
        .map
        .cursor_mut(&bundle.layout, lit)
        .remove_items_with(&mut |i| i.type_id().as_str() == "flashlight", 1);
    assert_eq!(removed.len(), 1);
    assert!(bundle.world.map.tile(lit).is_none());
}
