//! A complete item world: map stacks, vehicles and characters.

use crate::common::Position;
use crate::config::ItemConfig;
use crate::containers::{
    Character, ItemMap, MapSelector, TempCraftingInventory, VehicleSelector, Vehicles,
};
use crate::env::{ItemOracle, MapDimensions, MapOracle};
use crate::error::{CoreError, ErrorSeverity};
use crate::item::{Item, ItemError, ItemSpawner, ItemTypeId};

/// Errors raised while placing items into world containers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("position {0} is outside the map")]
    OutOfBounds(Position),

    #[error("no vehicle with index {0}")]
    UnknownVehicle(usize),

    #[error("vehicle '{vehicle}' has no part {part}")]
    InvalidPart { vehicle: String, part: usize },

    #[error("part {part} of vehicle '{vehicle}' has no cargo space")]
    NotCargo { vehicle: String, part: usize },

    #[error("no character named '{0}'")]
    UnknownCharacter(String),

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl CoreError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WorldError::Item(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use WorldError::*;
        match self {
            OutOfBounds(_) => "WORLD_OUT_OF_BOUNDS",
            UnknownVehicle(_) => "WORLD_UNKNOWN_VEHICLE",
            InvalidPart { .. } => "WORLD_INVALID_PART",
            NotCargo { .. } => "WORLD_NOT_CARGO",
            UnknownCharacter(_) => "WORLD_UNKNOWN_CHARACTER",
            Item(err) => err.error_code(),
        }
    }
}

/// Everything that holds items, plus the uid allocator shared by all of it.
#[derive(Clone, Debug)]
pub struct ItemWorld {
    pub config: ItemConfig,
    pub map: ItemMap,
    pub vehicles: Vehicles,
    pub characters: Vec<Character>,
    pub spawner: ItemSpawner,
}

impl ItemWorld {
    pub fn new(dimensions: MapDimensions, config: ItemConfig) -> Self {
        Self {
            config,
            map: ItemMap::new(dimensions),
            vehicles: Vehicles::new(),
            characters: Vec::new(),
            spawner: ItemSpawner::new(),
        }
    }

    /// Builds a fresh item of `type_id` with a new uid.
    pub fn spawn(&mut self, items: &dyn ItemOracle, type_id: &ItemTypeId) -> Result<Item, WorldError> {
        Ok(self.spawner.spawn_by_id(items, type_id)?)
    }

    pub fn character(&self, name: &str) -> Result<&Character, WorldError> {
        self.characters
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| WorldError::UnknownCharacter(name.to_owned()))
    }

    pub fn character_mut(&mut self, name: &str) -> Result<&mut Character, WorldError> {
        self.characters
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| WorldError::UnknownCharacter(name.to_owned()))
    }

    /// Accessible tiles within the configured selector radius of `center`.
    pub fn nearby_tiles<'l>(
        &self,
        layout: &'l dyn MapOracle,
        center: Position,
    ) -> MapSelector<'l, &ItemMap> {
        self.map
            .select(layout, center, self.config.selector_radius, true)
    }

    /// Cargo parts within the configured selector radius of `center`.
    pub fn nearby_cargo(&self, center: Position) -> VehicleSelector<&Vehicles> {
        self.vehicles.select(center, self.config.selector_radius)
    }

    /// Everything the named character could craft with: their own items,
    /// then items on nearby accessible tiles, then nearby vehicle cargo.
    pub fn crafting_inventory(
        &self,
        layout: &dyn MapOracle,
        name: &str,
    ) -> Result<TempCraftingInventory<'_>, WorldError> {
        let character = self.character(name)?;
        let mut crafting = TempCraftingInventory::new();
        crafting.add_all_ref(character);

        let tiles = self.nearby_tiles(layout, character.position);
        for position in tiles.positions() {
            crafting.extend_refs(self.map.visible_items(layout, *position));
        }

        let cargo = self.nearby_cargo(character.position);
        for slot in cargo.members() {
            let part = self
                .vehicles
                .get(slot.vehicle)
                .and_then(|v| v.part(slot.part))
                .and_then(|p| p.cargo());
            crafting.extend_refs(part.into_iter().flatten());
        }

        tracing::debug!(
            character = name,
            entries = crafting.len(),
            "assembled crafting inventory"
        );
        Ok(crafting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_errors_keep_their_codes() {
        let err = WorldError::from(ItemError::UnknownType(ItemTypeId::from("ghost")));
        assert_eq!(err.error_code(), "ITEM_UNKNOWN_TYPE");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(WorldError::UnknownVehicle(3).error_code(), "WORLD_UNKNOWN_VEHICLE");
    }
}
