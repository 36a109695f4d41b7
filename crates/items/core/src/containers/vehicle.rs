//! Vehicles, their cargo parts, and cursors/selectors over cargo.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};

use tree_walk::{VisitResponse, remove_matching, walk_all};

use crate::common::Position;
use crate::env::ItemOracle;
use crate::item::{Item, ItemFlags, ItemUid, QualityId};
use crate::visitable::{
    Caches, Visitable, VisitableMut, Visitor, max_quality_walk, quality_count_walk,
};
use crate::world::WorldError;

/// Address of one part of one vehicle in a [`Vehicles`] collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CargoSlot {
    pub vehicle: usize,
    pub part: usize,
}

/// One installed vehicle part.
///
/// Parts with cargo space hold items; parts may also provide tool
/// qualities of their own (a welding rig, a kitchen unit).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VehiclePart {
    pub name: String,
    /// Offset from the vehicle's position.
    pub mount: Position,
    /// Weight of the part itself, in grams.
    pub base_weight: u32,
    pub qualities: BTreeMap<QualityId, i32>,
    cargo: Option<Vec<Item>>,
}

impl VehiclePart {
    pub fn new(name: impl Into<String>, mount: Position) -> Self {
        Self {
            name: name.into(),
            mount,
            base_weight: 0,
            qualities: BTreeMap::new(),
            cargo: None,
        }
    }

    /// Gives the part (empty) cargo space.
    #[must_use]
    pub fn with_cargo(mut self) -> Self {
        self.cargo.get_or_insert_with(Vec::new);
        self
    }

    #[must_use]
    pub fn with_weight(mut self, grams: u32) -> Self {
        self.base_weight = grams;
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<QualityId>, level: i32) -> Self {
        self.qualities.insert(quality.into(), level);
        self
    }

    pub fn has_cargo(&self) -> bool {
        self.cargo.is_some()
    }

    pub fn cargo(&self) -> Option<&[Item]> {
        self.cargo.as_deref()
    }
}

/// A vehicle: named parts at offsets from a position.
///
/// Caches its total mass (dropped whenever cargo changes) and the uids of
/// active cargo items.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub name: String,
    pub position: Position,
    parts: Vec<VehiclePart>,
    mass: Cell<Option<u32>>,
    active: BTreeSet<ItemUid>,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            parts: Vec::new(),
            mass: Cell::new(None),
            active: BTreeSet::new(),
        }
    }

    /// Installs `part` and returns its index.
    pub fn add_part(&mut self, part: VehiclePart) -> usize {
        self.parts.push(part);
        self.invalidate(Caches::MASS | Caches::ACTIVE_ITEMS);
        self.parts.len() - 1
    }

    pub fn parts(&self) -> &[VehiclePart] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&VehiclePart> {
        self.parts.get(index)
    }

    /// Map position of part `index`.
    pub fn part_position(&self, index: usize) -> Option<Position> {
        self.parts.get(index).map(|p| self.position.offset(p.mount))
    }

    /// Stores `item` in the cargo of part `index`.
    ///
    /// # Errors
    ///
    /// - `WorldError::InvalidPart` if there is no such part
    /// - `WorldError::NotCargo` if the part has no cargo space
    pub fn add_item(&mut self, index: usize, item: Item) -> Result<(), WorldError> {
        self.cargo_mut(index)?.push(item);
        self.invalidate(Caches::MASS | Caches::ACTIVE_ITEMS);
        Ok(())
    }

    /// Weight of all parts and cargo, in grams. Cached until cargo changes.
    pub fn total_mass(&self, items: &dyn ItemOracle) -> u32 {
        if let Some(mass) = self.mass.get() {
            return mass;
        }

        let mut mass = self
            .parts
            .iter()
            .fold(0u32, |sum, p| sum.saturating_add(p.base_weight));
        let cargo = self.parts.iter().filter_map(|p| p.cargo.as_deref()).flatten();
        walk_all(cargo, &mut |node, _| {
            let ty = items.definition(node.type_id());
            let weight = ty.map_or(0, |ty| ty.weight);
            mass = mass.saturating_add(weight.saturating_mul(node.count(ty)));
            VisitResponse::Next
        });

        self.mass.set(Some(mass));
        mass
    }

    /// Mass computed by the last [`Vehicle::total_mass`], if still valid.
    pub fn cached_mass(&self) -> Option<u32> {
        self.mass.get()
    }

    /// Uids of active cargo items, nested ones included.
    pub fn active_items(&self) -> &BTreeSet<ItemUid> {
        &self.active
    }

    pub fn cursor(&self, part: usize) -> VehicleCursor<&Self> {
        VehicleCursor::new(self, part)
    }

    pub fn cursor_mut(&mut self, part: usize) -> VehicleCursor<&mut Self> {
        VehicleCursor::new(self, part)
    }

    fn cargo_mut(&mut self, index: usize) -> Result<&mut Vec<Item>, WorldError> {
        let name = &self.name;
        let part = self.parts.get_mut(index).ok_or_else(|| WorldError::InvalidPart {
            vehicle: name.clone(),
            part: index,
        })?;
        part.cargo.as_mut().ok_or_else(|| WorldError::NotCargo {
            vehicle: name.clone(),
            part: index,
        })
    }

    fn visit_part<'a>(&'a self, index: usize, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        match self.parts.get(index).and_then(|p| p.cargo.as_ref()) {
            Some(cargo) => walk_all(cargo, visitor),
            None => VisitResponse::Next,
        }
    }

    fn detach_from_part(
        &mut self,
        index: usize,
        filter: &mut dyn FnMut(&Item) -> bool,
        remaining: &mut usize,
        removed: &mut Vec<Item>,
    ) -> VisitResponse {
        match self.cargo_mut(index) {
            Ok(cargo) => remove_matching(cargo, filter, remaining, removed),
            Err(err) => {
                tracing::error!(error = %err, "cannot remove items from vehicle part");
                VisitResponse::Next
            }
        }
    }

    fn invalidate(&mut self, caches: Caches) {
        if caches.contains(Caches::MASS) {
            self.mass.set(None);
        }
        if caches.contains(Caches::ACTIVE_ITEMS) {
            let mut active = BTreeSet::new();
            let cargo = self.parts.iter().filter_map(|p| p.cargo.as_deref()).flatten();
            walk_all(cargo, &mut |node, _| {
                if node.has_flag(ItemFlags::ACTIVE) {
                    active.insert(node.uid());
                }
                VisitResponse::Next
            });
            self.active = active;
        }
    }
}

/// A view of the cargo of one vehicle part.
///
/// Quality queries also consult the part's own fixtures, which count as a
/// single unit.
pub struct VehicleCursor<M> {
    vehicle: M,
    part: usize,
}

impl<M> VehicleCursor<M>
where
    M: Deref<Target = Vehicle>,
{
    pub fn new(vehicle: M, part: usize) -> Self {
        Self { vehicle, part }
    }

    pub fn part(&self) -> usize {
        self.part
    }
}

impl<M> Visitable for VehicleCursor<M>
where
    M: Deref<Target = Vehicle>,
{
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        self.vehicle.visit_part(self.part, visitor)
    }

    /// Also counts qualities the part itself provides.
    fn max_quality(&self, items: &dyn ItemOracle, quality: &QualityId) -> Option<i32> {
        self.fixture_quality(quality)
            .into_iter()
            .chain(max_quality_walk(self, items, quality))
            .max()
    }

    fn has_quality(
        &self,
        items: &dyn ItemOracle,
        quality: &QualityId,
        level: i32,
        qty: u32,
    ) -> bool {
        if qty == 0 {
            return true;
        }
        let found = u32::from(self.fixture_quality(quality).is_some_and(|l| l >= level));
        if found >= qty {
            return true;
        }
        found.saturating_add(quality_count_walk(self, items, quality, level, qty - found)) >= qty
    }
}

impl<M> VehicleCursor<M>
where
    M: Deref<Target = Vehicle>,
{
    fn fixture_quality(&self, quality: &QualityId) -> Option<i32> {
        self.vehicle
            .part(self.part)
            .and_then(|p| p.qualities.get(quality).copied())
    }
}

impl<M> VisitableMut for VehicleCursor<M>
where
    M: DerefMut<Target = Vehicle>,
{
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let mut remaining = count;
        let mut removed = Vec::new();
        let part = self.part;
        self.vehicle
            .detach_from_part(part, filter, &mut remaining, &mut removed);
        removed
    }

    fn derived_caches(&self) -> Caches {
        Caches::MASS | Caches::ACTIVE_ITEMS
    }

    fn invalidate_caches(&mut self, caches: Caches) {
        self.vehicle.invalidate(caches);
    }
}

/// All vehicles in a world, addressed by index.
#[derive(Clone, Debug, Default)]
pub struct Vehicles {
    list: Vec<Vehicle>,
}

impl Vehicles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `vehicle` and returns its index.
    pub fn add(&mut self, vehicle: Vehicle) -> usize {
        self.list.push(vehicle);
        self.list.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.list.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vehicle> {
        self.list.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Stores `item` in the cargo at `slot`.
    ///
    /// # Errors
    ///
    /// `WorldError::UnknownVehicle` for a bad vehicle index, otherwise as
    /// [`Vehicle::add_item`].
    pub fn add_item(&mut self, slot: CargoSlot, item: Item) -> Result<(), WorldError> {
        self.list
            .get_mut(slot.vehicle)
            .ok_or(WorldError::UnknownVehicle(slot.vehicle))?
            .add_item(slot.part, item)
    }

    pub fn select(&self, center: Position, radius: u32) -> VehicleSelector<&Self> {
        VehicleSelector::new(self, center, radius)
    }

    pub fn select_mut(&mut self, center: Position, radius: u32) -> VehicleSelector<&mut Self> {
        VehicleSelector::new(self, center, radius)
    }
}

/// Every cargo part within a radius of a center.
///
/// Members are ordered by distance, then vehicle index, then part index.
pub struct VehicleSelector<M> {
    vehicles: M,
    members: Vec<CargoSlot>,
}

impl<M> VehicleSelector<M>
where
    M: Deref<Target = Vehicles>,
{
    pub fn new(vehicles: M, center: Position, radius: u32) -> Self {
        let mut found = Vec::new();
        for (vi, vehicle) in vehicles.iter().enumerate() {
            for (pi, part) in vehicle.parts().iter().enumerate() {
                let distance = center.chebyshev(vehicle.position.offset(part.mount));
                if part.has_cargo() && distance <= radius {
                    found.push((distance, CargoSlot { vehicle: vi, part: pi }));
                }
            }
        }
        found.sort();
        Self {
            vehicles,
            members: found.into_iter().map(|(_, slot)| slot).collect(),
        }
    }

    pub fn members(&self) -> &[CargoSlot] {
        &self.members
    }
}

impl<M> Visitable for VehicleSelector<M>
where
    M: Deref<Target = Vehicles>,
{
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        for slot in &self.members {
            let Some(vehicle) = self.vehicles.get(slot.vehicle) else {
                continue;
            };
            if vehicle.visit_part(slot.part, visitor).is_abort() {
                return VisitResponse::Abort;
            }
        }
        VisitResponse::Next
    }
}

impl<M> VisitableMut for VehicleSelector<M>
where
    M: DerefMut<Target = Vehicles>,
{
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let mut remaining = count;
        let mut removed = Vec::new();
        for slot in &self.members {
            let Some(vehicle) = self.vehicles.get_mut(slot.vehicle) else {
                tracing::error!(vehicle = slot.vehicle, "selector member refers to a missing vehicle");
                continue;
            };
            if vehicle
                .detach_from_part(slot.part, filter, &mut remaining, &mut removed)
                .is_abort()
            {
                break;
            }
        }
        removed
    }

    fn derived_caches(&self) -> Caches {
        Caches::MASS | Caches::ACTIVE_ITEMS
    }

    fn invalidate_caches(&mut self, caches: Caches) {
        let touched: BTreeSet<usize> = self.members.iter().map(|s| s.vehicle).collect();
        for index in touched {
            if let Some(vehicle) = self.vehicles.get_mut(index) {
                vehicle.invalidate(caches);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::fixtures::{catalog, spawn};
    use crate::item::{ItemSpawner, ItemTypeId};

    fn truck(spawner: &mut ItemSpawner) -> Vehicle {
        let mut truck = Vehicle::new("truck", Position::new(10, 10));
        truck.add_part(VehiclePart::new("frame", Position::ORIGIN).with_weight(10_000));
        let trunk = truck.add_part(
            VehiclePart::new("trunk", Position::new(1, 0))
                .with_cargo()
                .with_weight(5_000),
        );
        truck.add_part(
            VehiclePart::new("kitchen", Position::new(0, 1))
                .with_cargo()
                .with_quality("COOK", 3),
        );
        truck.add_item(trunk, spawn(spawner, "hammer")).unwrap();
        truck.add_item(trunk, spawn(spawner, "rock")).unwrap();
        truck
    }

    #[test]
    fn non_cargo_parts_reject_items() {
        let mut spawner = ItemSpawner::new();
        let mut v = truck(&mut spawner);
        let err = v.add_item(0, spawn(&mut spawner, "rock")).unwrap_err();
        assert!(matches!(err, WorldError::NotCargo { part: 0, .. }));
        let err = v.add_item(7, spawn(&mut spawner, "rock")).unwrap_err();
        assert!(matches!(err, WorldError::InvalidPart { part: 7, .. }));
    }

    #[test]
    fn invalid_part_cursor_is_empty_and_removes_nothing() {
        let mut spawner = ItemSpawner::new();
        let mut v = truck(&mut spawner);
        assert!(v.cursor(9).all_items().is_empty());
        assert!(v.cursor_mut(0).remove_items_with(&mut |_| true, 1).is_empty());
        assert!(v.cursor_mut(9).remove_items_with(&mut |_| true, 1).is_empty());
        assert_eq!(v.cursor(1).all_items().len(), 2);
    }

    #[test]
    fn removal_clears_mass_cache() {
        let mut spawner = ItemSpawner::new();
        let items = catalog();
        let mut v = truck(&mut spawner);
        assert_eq!(v.total_mass(&items), 10_000 + 5_000 + 900 + 700);
        assert!(v.cached_mass().is_some());

        let rock = ItemTypeId::from("rock");
        let removed = v.cursor_mut(1).remove_items_with(&mut |i| *i.type_id() == rock, 1);
        assert_eq!(removed.len(), 1);
        assert_eq!(v.cached_mass(), None);
        assert_eq!(v.total_mass(&items), 10_000 + 5_000 + 900);
    }

    #[test]
    fn removal_prunes_active_items() {
        let mut spawner = ItemSpawner::new();
        let mut v = truck(&mut spawner);
        let torch = spawn(&mut spawner, "flashlight").with_flags(ItemFlags::ACTIVE);
        let uid = torch.uid();
        v.add_item(2, torch).unwrap();
        assert!(v.active_items().contains(&uid));

        let removed = v.cursor_mut(2).remove_items_with(&mut |i| i.uid() == uid, 1);
        assert_eq!(removed.len(), 1);
        assert!(v.active_items().is_empty());
    }

    #[test]
    fn cursor_quality_includes_part_fixtures() {
        let mut spawner = ItemSpawner::new();
        let items = catalog();
        let v = truck(&mut spawner);
        let cook = QualityId::from("COOK");
        assert_eq!(v.cursor(2).max_quality(&items, &cook), Some(3));
        assert_eq!(v.cursor(1).max_quality(&items, &cook), None);
        assert_eq!(v.cursor(1).max_quality(&items, &QualityId::from("HAMMER")), Some(3));
    }

    #[test]
    fn cursor_has_quality_counts_part_fixture_once() {
        let mut spawner = ItemSpawner::new();
        let items = catalog();
        let mut v = truck(&mut spawner);
        let cook = QualityId::from("COOK");
        assert!(v.cursor(2).has_quality(&items, &cook, 3, 1));
        assert!(!v.cursor(2).has_quality(&items, &cook, 4, 1));
        assert!(!v.cursor(2).has_quality(&items, &cook, 1, 2));
        assert!(!v.cursor(1).has_quality(&items, &cook, 1, 1));

        let hammer = QualityId::from("HAMMER");
        v.add_item(2, spawn(&mut spawner, "rock")).unwrap();
        assert!(v.cursor(2).has_quality(&items, &hammer, 1, 1));
        assert!(v.cursor(1).has_quality(&items, &hammer, 1, 2));
        assert!(!v.cursor(1).has_quality(&items, &hammer, 1, 3));
    }

    #[test]
    fn selector_orders_by_distance_then_index() {
        let mut spawner = ItemSpawner::new();
        let mut vehicles = Vehicles::new();
        let mut far = Vehicle::new("cart", Position::new(13, 10));
        let bed = far.add_part(VehiclePart::new("bed", Position::ORIGIN).with_cargo());
        far.add_item(bed, spawn(&mut spawner, "jeans")).unwrap();
        vehicles.add(far);
        vehicles.add(truck(&mut spawner));

        let center = Position::new(11, 10);
        let selector = vehicles.select(center, 2);
        assert_eq!(
            selector.members(),
            [
                CargoSlot { vehicle: 1, part: 1 },
                CargoSlot { vehicle: 1, part: 2 },
                CargoSlot { vehicle: 0, part: 0 },
            ]
        );
        let names: Vec<_> = selector
            .all_items()
            .iter()
            .map(|i| i.type_id().to_string())
            .collect();
        assert_eq!(names, ["hammer", "rock", "jeans"]);

        let items = catalog();
        assert!(vehicles.iter().all(|v| v.total_mass(&items) > 0));
        let mut selector = vehicles.select_mut(center, 2);
        let removed = selector.remove_items_with(&mut |_| true, 3);
        assert_eq!(removed.len(), 3);
        assert!(vehicles.iter().all(|v| v.cached_mass().is_none()));
    }

    #[test]
    fn selector_abort_skips_later_parts() {
        let mut spawner = ItemSpawner::new();
        let mut vehicles = Vehicles::new();
        let mut v = truck(&mut spawner);
        v.add_item(2, spawn(&mut spawner, "jeans")).unwrap();
        vehicles.add(v);

        let selector = vehicles.select(Position::new(11, 10), 2);
        let mut seen = Vec::new();
        let response = selector.visit_items(&mut |item, _| {
            seen.push(item.type_id().to_string());
            if item.type_id().as_str() == "rock" {
                VisitResponse::Abort
            } else {
                VisitResponse::Next
            }
        });
        assert_eq!(response, VisitResponse::Abort);
        assert_eq!(seen, ["hammer", "rock"]);
    }
}
