//! Characters: wielded, worn and carried items plus non-item tool sources.

use std::collections::BTreeMap;

use tree_walk::{VisitResponse, remove_from_children, remove_matching, walk_all};

use crate::common::Position;
use crate::config::UpsRules;
use crate::containers::{CargoSlot, Inventory, VehiclePart};
use crate::env::ItemOracle;
use crate::item::{Item, ItemFlags, ItemTypeId, QualityId};
use crate::visitable::{
    Visitable, VisitableMut, Visitor, charges_walk, max_quality_walk, quality_count_walk,
};

/// An installed bionic.
///
/// Powered bionics contribute their qualities directly and may expose a
/// pseudo item (an integrated tool) that queries see like a carried one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bionic {
    pub id: String,
    pub powered: bool,
    pub qualities: BTreeMap<QualityId, i32>,
    pub pseudo_item: Option<Item>,
}

impl Bionic {
    /// Bionic that lets the character draw power-cell charges from stored
    /// bionic power.
    pub const UPS: &'static str = "bio_ups";

    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            powered: false,
            qualities: BTreeMap::new(),
            pseudo_item: None,
        }
    }

    #[must_use]
    pub fn powered(mut self) -> Self {
        self.powered = true;
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<QualityId>, level: i32) -> Self {
        self.qualities.insert(quality.into(), level);
        self
    }

    /// Attaches the integrated tool this bionic provides, marked as pseudo.
    #[must_use]
    pub fn with_pseudo_item(mut self, item: Item) -> Self {
        self.pseudo_item = Some(item.with_flags(ItemFlags::PSEUDO));
        self
    }
}

/// A quality bonus granted by a character trait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitBonus {
    pub trait_id: String,
    pub quality: QualityId,
    pub level: i32,
}

/// A vehicle part tool the character is currently using (e.g. a workbench
/// they stand at).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountedTool {
    pub slot: CargoSlot,
    pub qualities: BTreeMap<QualityId, i32>,
}

impl MountedTool {
    pub fn from_part(slot: CargoSlot, part: &VehiclePart) -> Self {
        Self {
            slot,
            qualities: part.qualities.clone(),
        }
    }
}

/// Stored bionic power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerState {
    pub stored_kj: u32,
}

/// A character and everything it can use as a tool or ingredient.
///
/// Items are visited weapon first, then worn items from the outermost layer
/// inwards, then the pseudo items of powered bionics, then the inventory.
#[derive(Clone, Debug, Default)]
pub struct Character {
    pub name: String,
    pub position: Position,
    pub weapon: Option<Item>,
    /// Worn items, innermost layer first.
    pub worn: Vec<Item>,
    pub inventory: Inventory,
    pub bionics: Vec<Bionic>,
    pub traits: Vec<TraitBonus>,
    pub mounted_tools: Vec<MountedTool>,
    pub power: PowerState,
    pub ups: UpsRules,
}

impl Character {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    /// Puts `item` on as the new outermost layer.
    pub fn wear(&mut self, item: Item) {
        self.worn.push(item);
    }

    /// Wields `item`, returning the previously wielded one.
    pub fn wield(&mut self, item: Item) -> Option<Item> {
        self.weapon.replace(item)
    }

    pub fn has_active_bionic(&self, id: &str) -> bool {
        self.bionics.iter().any(|b| b.powered && b.id == id)
    }

    /// Quality levels from sources other than items: powered bionics,
    /// mounted vehicle tools and traits.
    fn extra_qualities<'s>(&'s self, quality: &'s QualityId) -> impl Iterator<Item = i32> + 's {
        let bionics = self
            .bionics
            .iter()
            .filter(|b| b.powered)
            .filter_map(move |b| b.qualities.get(quality).copied());
        let tools = self
            .mounted_tools
            .iter()
            .filter_map(move |t| t.qualities.get(quality).copied());
        let traits = self
            .traits
            .iter()
            .filter(move |t| t.quality == *quality)
            .map(|t| t.level);
        bionics.chain(tools).chain(traits)
    }

    /// Power-cell charges: switched-off UPS units, advanced units scaled by
    /// their efficiency, and stored bionic power when the bionic UPS runs.
    fn ups_charges(&self, limit: u32, filter: &dyn Fn(&Item) -> bool) -> u32 {
        let mut qty = charges_walk(self, &ItemTypeId::UPS_OFF, limit, filter);
        if qty < limit {
            let advanced = charges_walk(self, &ItemTypeId::ADV_UPS_OFF, u32::MAX, filter);
            qty = qty.saturating_add(self.ups.scale_advanced(advanced));
        }
        if qty < limit && self.has_active_bionic(Bionic::UPS) {
            qty = qty.saturating_add(self.ups.charges_from_power(self.power.stored_kj));
        }
        qty.min(limit)
    }
}

impl Visitable for Character {
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        let pseudo = self
            .bionics
            .iter()
            .filter(|b| b.powered)
            .filter_map(|b| b.pseudo_item.as_ref());
        let roots = self
            .weapon
            .iter()
            .chain(self.worn.iter().rev())
            .chain(pseudo)
            .chain(self.inventory.items());
        walk_all(roots, visitor)
    }

    fn charges_of_with(
        &self,
        what: &ItemTypeId,
        limit: u32,
        filter: &dyn Fn(&Item) -> bool,
    ) -> u32 {
        if limit == 0 {
            return 0;
        }
        if *what == ItemTypeId::UPS {
            return self.ups_charges(limit, filter);
        }
        charges_walk(self, what, limit, filter)
    }

    fn max_quality(&self, items: &dyn ItemOracle, quality: &QualityId) -> Option<i32> {
        self.extra_qualities(quality)
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
        let extra = self.extra_qualities(quality).filter(|&l| l >= level).count();
        let found = u32::try_from(extra).unwrap_or(u32::MAX);
        if found >= qty {
            return true;
        }
        found.saturating_add(quality_count_walk(self, items, quality, level, qty - found)) >= qty
    }
}

/// Removal searches the inventory, then worn items, then the weapon.
///
/// Bionic pseudo items are never removed.
impl VisitableMut for Character {
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let mut removed = self.inventory.remove_items_with(filter, count);
        let mut remaining = count - removed.len();
        if remaining == 0 {
            return removed;
        }

        if remove_matching(&mut self.worn, filter, &mut remaining, &mut removed).is_abort() {
            return removed;
        }

        if let Some(weapon) = self.weapon.as_mut() {
            if filter(weapon) {
                removed.extend(self.weapon.take());
            } else {
                remove_from_children(weapon, filter, &mut remaining, &mut removed);
            }
        }
        removed
    }
}
