use tree_walk::{VisitResponse, walk_all};

use crate::item::{Item, ItemFlags};
use crate::visitable::{Visitable, VisitableMut, Visitor};

/// Scratch view of everything a crafter can reach.
///
/// Holds borrowed top-level items gathered from other containers (the
/// character, nearby tiles, vehicle cargo) plus owned pseudo tools such as
/// a fire or a nearby appliance. Borrowed items are visited first, in the
/// order they were added.
///
/// The view cannot detach anything: its items belong to other containers.
#[derive(Debug, Default)]
pub struct TempCraftingInventory<'a> {
    items: Vec<&'a Item>,
    pseudo: Vec<Item>,
}

impl<'a> TempCraftingInventory<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ref(&mut self, item: &'a Item) {
        self.items.push(item);
    }

    pub fn extend_refs<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a Item>,
    {
        self.items.extend(items);
    }

    /// Adds every top-level item of `source`.
    pub fn add_all_ref<V>(&mut self, source: &'a V)
    where
        V: Visitable + ?Sized,
    {
        self.items.extend(source.top_level());
    }

    /// Adds an owned tool that is not a real item, marked as pseudo.
    pub fn add_pseudo(&mut self, item: Item) {
        self.pseudo.push(item.with_flags(ItemFlags::PSEUDO));
    }

    /// Number of top-level entries, pseudo tools included.
    pub fn len(&self) -> usize {
        self.items.len() + self.pseudo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Visitable for TempCraftingInventory<'_> {
    fn visit_items<'b>(&'b self, visitor: &mut Visitor<'_, 'b>) -> VisitResponse {
        let borrowed: &'b [&'b Item] = &self.items;
        walk_all(borrowed.iter().copied().chain(&self.pseudo), visitor)
    }
}

impl VisitableMut for TempCraftingInventory<'_> {
    fn detach_items_with(
        &mut self,
        _filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        tracing::error!(count, "cannot remove items through a crafting inventory view");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Position;
    use crate::containers::fixtures::{catalog, spawn};
    use crate::containers::{Character, Inventory};
    use crate::item::{ItemSpawner, ItemTypeId, QualityId};

    #[test]
    fn gathers_top_level_items_and_pseudo_tools() {
        let mut spawner = ItemSpawner::new();
        let mut ch = Character::new("Ana", Position::ORIGIN);
        let mut pack = spawn(&mut spawner, "backpack");
        pack.put_in_container(spawn(&mut spawner, "thread")).unwrap();
        ch.wear(pack);
        let mut stash = Inventory::new();
        stash.add(spawn(&mut spawner, "rock"));

        let mut crafting = TempCraftingInventory::new();
        crafting.add_all_ref(&ch);
        crafting.add_all_ref(&stash);
        crafting.add_pseudo(spawn(&mut spawner, "hammer"));

        assert_eq!(crafting.len(), 3);
        let names: Vec<_> = crafting
            .all_items()
            .iter()
            .map(|i| i.type_id().to_string())
            .collect();
        assert_eq!(names, ["backpack", "thread", "rock", "hammer"]);

        let items = catalog();
        assert_eq!(crafting.charges_of(&ItemTypeId::from("thread"), 200), 50);
        assert_eq!(crafting.max_quality(&items, &QualityId::from("HAMMER")), Some(3));
        assert_eq!(crafting.amount_of(&ItemTypeId::from("hammer"), false, 5), 0);
        assert_eq!(crafting.amount_of(&ItemTypeId::from("hammer"), true, 5), 1);
    }

    #[test]
    fn removal_is_a_no_op() {
        let mut spawner = ItemSpawner::new();
        let rock = spawn(&mut spawner, "rock");
        let mut crafting = TempCraftingInventory::new();
        crafting.add_ref(&rock);
        assert!(crafting.remove_items_with(&mut |_| true, 1).is_empty());
        assert!(crafting.has_item(&rock));
    }
}
