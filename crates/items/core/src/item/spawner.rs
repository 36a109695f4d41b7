use crate::env::{ItemOracle, ItemType};

use super::{Item, ItemError, ItemTypeId, ItemUid};

/// Allocates item uids and builds items from their type definitions.
///
/// Uids are monotonically increasing and never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSpawner {
    next_uid: u64,
}

impl ItemSpawner {
    pub fn new() -> Self {
        Self { next_uid: 1 }
    }

    /// Resumes allocation after `last` (e.g. when reloading saved items).
    pub fn starting_after(last: ItemUid) -> Self {
        Self {
            next_uid: last.0.saturating_add(1),
        }
    }

    /// Allocates a new unique uid.
    pub fn allocate_uid(&mut self) -> ItemUid {
        let uid = ItemUid(self.next_uid);
        self.next_uid += 1;
        uid
    }

    /// Builds an item of `ty` with the pockets and charges it declares.
    pub fn spawn(&mut self, ty: &ItemType) -> Item {
        let uid = self.allocate_uid();
        Item::from_type(uid, ty)
    }

    /// Looks up `type_id` and builds an item of that type.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::UnknownType` if the oracle has no such definition.
    pub fn spawn_by_id<O>(&mut self, oracle: &O, type_id: &ItemTypeId) -> Result<Item, ItemError>
    where
        O: ItemOracle + ?Sized,
    {
        let ty = oracle
            .definition(type_id)
            .ok_or_else(|| ItemError::UnknownType(type_id.clone()))?;
        Ok(self.spawn(ty))
    }
}

impl Default for ItemSpawner {
    fn default() -> Self {
        Self::new()
    }
}
