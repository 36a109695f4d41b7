use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::ItemConfig;
use crate::item::{ItemTypeId, PocketKind, QualityId};

/// Static item type metadata, keyed by [`ItemTypeId`].
pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &ItemTypeId) -> Option<&ItemType>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<&ItemType>;
}

/// Item type definition shared by every instance of the type.
///
/// # Stacking
///
/// Types with `count_by_charges` (ammunition, thread, batteries' contents)
/// represent a quantity through the instance's charges; every other type
/// counts one unit per instance.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemType {
    pub id: ItemTypeId,
    /// Weight of one unit, in grams.
    pub weight: u32,
    pub count_by_charges: bool,
    /// Charges a freshly spawned instance starts with.
    pub initial_charges: u32,
    /// Pockets created on every freshly spawned instance, in order.
    pub pockets: ArrayVec<PocketKind, { ItemConfig::MAX_POCKETS_PER_TYPE }>,
    pub qualities: BTreeMap<QualityId, i32>,
    /// Base calories of one unit when eaten.
    pub kcal: i32,
    /// Light emitted by a freshly spawned instance.
    pub light: u16,
}

impl ItemType {
    pub fn new(id: impl Into<ItemTypeId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_weight(mut self, grams: u32) -> Self {
        self.weight = grams;
        self
    }

    #[must_use]
    pub fn counted_by_charges(mut self, initial_charges: u32) -> Self {
        self.count_by_charges = true;
        self.initial_charges = initial_charges;
        self
    }

    #[must_use]
    pub fn with_initial_charges(mut self, charges: u32) -> Self {
        self.initial_charges = charges;
        self
    }

    /// Declares a pocket created on spawn.
    ///
    /// # Panics
    ///
    /// Panics if the type already declares
    /// [`ItemConfig::MAX_POCKETS_PER_TYPE`] pockets.
    #[must_use]
    pub fn with_pocket(mut self, kind: PocketKind) -> Self {
        self.pockets.push(kind);
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<QualityId>, level: i32) -> Self {
        self.qualities.insert(quality.into(), level);
        self
    }

    #[must_use]
    pub fn with_kcal(mut self, kcal: i32) -> Self {
        self.kcal = kcal;
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: u16) -> Self {
        self.light = light;
        self
    }

    /// Quality rating of this type, if it has the quality at all.
    pub fn quality(&self, quality: &QualityId) -> Option<i32> {
        self.qualities.get(quality).copied()
    }

    pub fn is_container(&self) -> bool {
        self.pockets.contains(&PocketKind::Container)
    }
}
