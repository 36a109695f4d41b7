//! Item instances and their pockets.
//!
//! An [`Item`] owns its pockets and a pocket owns its items by value, so an
//! item tree can never contain its own ancestor. Static properties (weight,
//! qualities, nutrition) live in [`crate::ItemType`] and are looked up through
//! [`crate::ItemOracle`] by [`ItemTypeId`].
mod error;
mod flags;
mod id;
mod pocket;
mod spawner;

pub use error::ItemError;
pub use flags::ItemFlags;
pub use id::{ItemTypeId, ItemUid, QualityId};
pub use pocket::{Pocket, PocketKind};
pub use spawner::ItemSpawner;

use tree_walk::{Node, NodeMut};

use crate::config::ItemConfig;
use crate::env::ItemType;

/// One item node: a type reference, instance state and its pockets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    uid: ItemUid,
    type_id: ItemTypeId,
    /// Charges or loaded ammunition.
    pub charges: u32,
    /// Accumulated damage; broken at [`ItemConfig::MAX_DAMAGE`].
    pub damage: u16,
    pub flags: ItemFlags,
    /// Light currently emitted by this item.
    pub light: u16,
    pockets: Vec<Pocket>,
}

impl Item {
    /// Creates a bare item with no pockets.
    ///
    /// Prefer [`ItemSpawner`], which allocates a fresh uid and builds the
    /// pockets declared by the item's type.
    pub fn new(uid: ItemUid, type_id: ItemTypeId) -> Self {
        Self {
            uid,
            type_id,
            charges: 0,
            damage: 0,
            flags: ItemFlags::empty(),
            light: 0,
            pockets: Vec::new(),
        }
    }

    pub(crate) fn from_type(uid: ItemUid, ty: &ItemType) -> Self {
        let mut item = Self::new(uid, ty.id.clone());
        item.charges = ty.initial_charges;
        item.light = ty.light;
        item.pockets = ty.pockets.iter().map(|kind| Pocket::new(*kind)).collect();
        item
    }

    pub fn uid(&self) -> ItemUid {
        self.uid
    }

    pub fn type_id(&self) -> &ItemTypeId {
        &self.type_id
    }

    pub fn has_flag(&self, flag: ItemFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_broken(&self) -> bool {
        self.damage >= ItemConfig::MAX_DAMAGE
    }

    pub fn is_pseudo(&self) -> bool {
        self.has_flag(ItemFlags::PSEUDO)
    }

    /// An item is a container when it has at least one container pocket.
    pub fn is_container(&self) -> bool {
        self.pockets
            .iter()
            .any(|p| p.kind() == PocketKind::Container)
    }

    /// Adds an empty pocket of the given kind (builder pattern).
    #[must_use]
    pub fn with_pocket(mut self, kind: PocketKind) -> Self {
        self.pockets.push(Pocket::new(kind));
        self
    }

    /// Sets the charge count (builder pattern).
    #[must_use]
    pub fn with_charges(mut self, charges: u32) -> Self {
        self.charges = charges;
        self
    }

    /// Adds state flags (builder pattern).
    #[must_use]
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    pub fn pockets_mut(&mut self) -> &mut [Pocket] {
        &mut self.pockets
    }

    /// Items stored in pockets of `kind`, across all such pockets.
    ///
    /// This is the only way to reach non-container pockets; generic walks
    /// never descend into them.
    pub fn items_in(&self, kind: PocketKind) -> impl Iterator<Item = &Item> {
        self.pockets
            .iter()
            .filter(move |p| p.kind() == kind)
            .flat_map(|p| p.items.iter())
    }

    /// Places `item` into the first unsealed pocket of `kind`.
    ///
    /// # Errors
    ///
    /// - `ItemError::NoPocket` if this item has no pocket of that kind
    /// - `ItemError::PocketSealed` if every such pocket is sealed
    pub fn put_in(&mut self, item: Item, kind: PocketKind) -> Result<(), ItemError> {
        let mut saw_kind = false;
        for pocket in self.pockets.iter_mut().filter(|p| p.kind() == kind) {
            saw_kind = true;
            if !pocket.is_sealed() {
                pocket.items.push(item);
                return Ok(());
            }
        }

        if saw_kind {
            Err(ItemError::PocketSealed {
                item: self.uid,
                kind,
            })
        } else {
            Err(ItemError::NoPocket {
                item: self.uid,
                kind,
            })
        }
    }

    /// Shorthand for `put_in(item, PocketKind::Container)`.
    pub fn put_in_container(&mut self, item: Item) -> Result<(), ItemError> {
        self.put_in(item, PocketKind::Container)
    }

    /// Number of units this item represents: its charges when the type is
    /// counted by charges, otherwise one.
    pub fn count(&self, ty: Option<&ItemType>) -> u32 {
        match ty {
            Some(ty) if ty.count_by_charges => self.charges,
            _ => 1,
        }
    }
}

impl Node for Item {
    fn children(&self) -> impl Iterator<Item = &Item> {
        self.items_in(PocketKind::Container)
    }
}

impl NodeMut for Item {
    fn child_lists_mut(&mut self) -> impl Iterator<Item = &mut Vec<Item>> {
        self.pockets
            .iter_mut()
            .filter(|p| p.kind() == PocketKind::Container)
            .map(|p| &mut p.items)
    }
}
