//! Scenario loader: places items on the map, in vehicles and on characters.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use item_core::{
    Bionic, CargoSlot, Character, Item, ItemConfig, ItemFlags, ItemOracle, ItemSpawner,
    ItemTypeId, ItemWorld, MapDimensions, MountedTool, Position, PowerState, QualityId,
    TraitBonus, UpsRules, Vehicle, VehiclePart, Vehicles,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One item to spawn, with optional overrides and container contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub type_id: ItemTypeId,
    /// Replaces the type's initial charges.
    #[serde(default)]
    pub charges: Option<u32>,
    #[serde(default)]
    pub damage: u16,
    #[serde(default)]
    pub flags: ItemFlags,
    /// Items placed in the first container pocket.
    #[serde(default)]
    pub contents: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSpec {
    pub position: Position,
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSpec {
    pub name: String,
    pub mount: Position,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub cargo: bool,
    #[serde(default)]
    pub qualities: BTreeMap<QualityId, i32>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub name: String,
    pub position: Position,
    pub parts: Vec<PartSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BionicSpec {
    pub id: String,
    #[serde(default)]
    pub powered: bool,
    #[serde(default)]
    pub qualities: BTreeMap<QualityId, i32>,
    #[serde(default)]
    pub pseudo_item: Option<ItemTypeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub weapon: Option<ItemSpec>,
    /// Worn items, innermost layer first.
    #[serde(default)]
    pub worn: Vec<ItemSpec>,
    #[serde(default)]
    pub inventory: Vec<ItemSpec>,
    #[serde(default)]
    pub bionics: Vec<BionicSpec>,
    /// (trait id, quality, level)
    #[serde(default)]
    pub traits: Vec<(String, QualityId, i32)>,
    /// Vehicle parts the character works at, as (vehicle index, part index).
    #[serde(default)]
    pub mounted_tools: Vec<(usize, usize)>,
    #[serde(default)]
    pub power_kj: u32,
}

/// Scenario structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Name of the map layout under `maps/`.
    pub map: String,
    #[serde(default)]
    pub tiles: Vec<TileSpec>,
    #[serde(default)]
    pub vehicles: Vec<VehicleSpec>,
    #[serde(default)]
    pub characters: Vec<CharacterSpec>,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Read a scenario description without building anything.
    pub fn load_spec(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        ron::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }

    /// Build a populated world from a scenario description.
    ///
    /// Every item gets a fresh uid from the world's spawner. Vehicles are
    /// built before characters so mounted tools can refer to their parts.
    pub fn build(
        spec: &ScenarioSpec,
        items: &dyn ItemOracle,
        dimensions: MapDimensions,
        config: ItemConfig,
    ) -> LoadResult<ItemWorld> {
        let mut world = ItemWorld::new(dimensions, config);

        for tile in &spec.tiles {
            for item in &tile.items {
                let item = build_item(item, items, &mut world.spawner)?;
                world
                    .map
                    .add_item(tile.position, item)
                    .with_context(|| format!("placing items on tile {}", tile.position))?;
            }
        }

        for vehicle in &spec.vehicles {
            let built = build_vehicle(vehicle, items, &mut world.spawner)
                .with_context(|| format!("building vehicle '{}'", vehicle.name))?;
            world.vehicles.add(built);
        }

        for character in &spec.characters {
            let built = build_character(
                character,
                items,
                &mut world.spawner,
                &world.vehicles,
                world.config.ups,
            )
            .with_context(|| format!("building character '{}'", character.name))?;
            world.characters.push(built);
        }

        tracing::info!(
            tiles = spec.tiles.len(),
            vehicles = world.vehicles.len(),
            characters = world.characters.len(),
            "scenario built"
        );
        Ok(world)
    }
}

/// Spawns the item described by `spec`, with its contents.
pub(crate) fn build_item(
    spec: &ItemSpec,
    items: &dyn ItemOracle,
    spawner: &mut ItemSpawner,
) -> LoadResult<Item> {
    let mut item = spawner.spawn_by_id(items, &spec.type_id)?;
    if let Some(charges) = spec.charges {
        item.charges = charges;
    }
    item.damage = spec.damage;
    item.flags |= spec.flags;

    for child in &spec.contents {
        let child = build_item(child, items, spawner)?;
        item.put_in_container(child)
            .with_context(|| format!("filling '{}'", spec.type_id))?;
    }
    Ok(item)
}

fn build_vehicle(
    spec: &VehicleSpec,
    items: &dyn ItemOracle,
    spawner: &mut ItemSpawner,
) -> LoadResult<Vehicle> {
    let mut vehicle = Vehicle::new(spec.name.clone(), spec.position);
    for part_spec in &spec.parts {
        let mut part = VehiclePart::new(part_spec.name.clone(), part_spec.mount)
            .with_weight(part_spec.weight);
        part.qualities = part_spec.qualities.clone();
        if part_spec.cargo {
            part = part.with_cargo();
        }

        let index = vehicle.add_part(part);
        for item in &part_spec.items {
            let item = build_item(item, items, spawner)?;
            vehicle.add_item(index, item)?;
        }
    }
    Ok(vehicle)
}

fn build_character(
    spec: &CharacterSpec,
    items: &dyn ItemOracle,
    spawner: &mut ItemSpawner,
    vehicles: &Vehicles,
    ups: UpsRules,
) -> LoadResult<Character> {
    let mut character = Character::new(spec.name.clone(), spec.position);
    character.ups = ups;
    character.power = PowerState {
        stored_kj: spec.power_kj,
    };

    if let Some(weapon) = &spec.weapon {
        character.wield(build_item(weapon, items, spawner)?);
    }
    for worn in &spec.worn {
        character.wear(build_item(worn, items, spawner)?);
    }
    for carried in &spec.inventory {
        character.inventory.add(build_item(carried, items, spawner)?);
    }

    for bionic_spec in &spec.bionics {
        let mut bionic = Bionic::new(bionic_spec.id.clone());
        bionic.powered = bionic_spec.powered;
        bionic.qualities = bionic_spec.qualities.clone();
        if let Some(type_id) = &bionic_spec.pseudo_item {
            bionic = bionic.with_pseudo_item(spawner.spawn_by_id(items, type_id)?);
        }
        character.bionics.push(bionic);
    }

    character.traits = spec
        .traits
        .iter()
        .map(|(trait_id, quality, level)| TraitBonus {
            trait_id: trait_id.clone(),
            quality: quality.clone(),
            level: *level,
        })
        .collect();

    for &(vehicle, part) in &spec.mounted_tools {
        let slot = CargoSlot { vehicle, part };
        let part = vehicles
            .get(vehicle)
            .and_then(|v| v.part(part))
            .with_context(|| format!("mounted tool refers to missing part {slot:?}"))?;
        character.mounted_tools.push(MountedTool::from_part(slot, part));
    }

    Ok(character)
}
