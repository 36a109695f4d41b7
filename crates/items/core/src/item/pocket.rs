//! Typed storage slots inside an item.

use super::Item;

/// Semantic kind of a pocket.
///
/// Only `Container` pockets are descended into by generic walks; the other
/// kinds hold items that are part of the item's mechanism (a loaded
/// magazine, installed mods) and are reached through
/// [`Item::items_in`](super::Item::items_in).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PocketKind {
    Container,
    Magazine,
    MagazineWell,
    Mod,
    Corpse,
    Software,
}

/// Ordered storage of one pocket kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pocket {
    kind: PocketKind,
    sealed: bool,
    pub(crate) items: Vec<Item>,
}

impl Pocket {
    pub fn new(kind: PocketKind) -> Self {
        Self {
            kind,
            sealed: false,
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> PocketKind {
        self.kind
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
