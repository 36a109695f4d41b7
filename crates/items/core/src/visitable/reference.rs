use super::Visitable;
use crate::item::{Item, ItemTypeId, ItemUid};

/// A handle to an item that survives structural edits of its container.
///
/// Unlike a borrow, the handle can be held across removals. Resolving it
/// walks the container for the original uid: sibling removals leave it
/// valid, while removing the item itself makes it stale for good, even if
/// another item of the same type takes its place.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SafeItemRef {
    uid: ItemUid,
    type_id: ItemTypeId,
}

impl SafeItemRef {
    pub fn new(item: &Item) -> Self {
        Self {
            uid: item.uid(),
            type_id: item.type_id().clone(),
        }
    }

    pub fn uid(&self) -> ItemUid {
        self.uid
    }

    /// Type of the referenced item at the time the handle was taken.
    pub fn type_id(&self) -> &ItemTypeId {
        &self.type_id
    }

    /// Finds the referenced item inside `container`.
    pub fn resolve<'a, V>(&self, container: &'a V) -> Option<&'a Item>
    where
        V: Visitable + ?Sized,
    {
        let found = container.items_with(&|node| node.uid() == self.uid);
        found.into_iter().next()
    }

    pub fn is_valid<V>(&self, container: &V) -> bool
    where
        V: Visitable + ?Sized,
    {
        container.has_item_with(&|node| node.uid() == self.uid)
    }
}
