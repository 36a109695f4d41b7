use std::cell::OnceCell;
use std::collections::BTreeMap;

use tree_walk::{VisitResponse, remove_matching, walk_all};

use crate::item::{Item, ItemTypeId, ItemUid};
use crate::visitable::{Caches, Visitable, VisitableMut, Visitor, amount_walk, charges_walk};

/// Items of one type sharing an inventory letter.
#[derive(Clone, Debug, Default)]
pub struct InventoryStack {
    /// Letter the player uses to pick this stack, if assigned.
    pub invlet: Option<char>,
    items: Vec<Item>,
}

impl InventoryStack {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn type_id(&self) -> Option<&ItemTypeId> {
        self.items.first().map(Item::type_id)
    }
}

/// A character's carried items, grouped into stacks.
///
/// Keeps a lazily built index from item type to the uids of every reachable
/// item of that type (nested ones included). Amount and charge queries use
/// it to answer "none here" without walking.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    stacks: Vec<InventoryStack>,
    binned: OnceCell<BTreeMap<ItemTypeId, Vec<ItemUid>>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` to the stack holding its type, or opens a new stack.
    pub fn add(&mut self, item: Item) {
        match self
            .stacks
            .iter_mut()
            .find(|s| s.type_id() == Some(item.type_id()))
        {
            Some(stack) => stack.items.push(item),
            None => self.stacks.push(InventoryStack {
                invlet: None,
                items: vec![item],
            }),
        }
        self.binned.take();
    }

    /// Adds `item` as a new stack picked by `invlet`.
    pub fn add_with_invlet(&mut self, item: Item, invlet: char) {
        self.stacks.push(InventoryStack {
            invlet: Some(invlet),
            items: vec![item],
        });
        self.binned.take();
    }

    pub fn stacks(&self) -> &[InventoryStack] {
        &self.stacks
    }

    /// Top-level items in stack order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.stacks.iter().flat_map(|s| s.items.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Stack picked by `invlet`.
    pub fn stack_by_invlet(&self, invlet: char) -> Option<&InventoryStack> {
        self.stacks.iter().find(|s| s.invlet == Some(invlet))
    }

    /// Type index, built on first use after any change.
    pub fn binned(&self) -> &BTreeMap<ItemTypeId, Vec<ItemUid>> {
        self.binned.get_or_init(|| {
            let mut bins: BTreeMap<ItemTypeId, Vec<ItemUid>> = BTreeMap::new();
            walk_all(self.items(), &mut |node, _| {
                bins.entry(node.type_id().clone())
                    .or_default()
                    .push(node.uid());
                VisitResponse::Next
            });
            tracing::trace!(types = bins.len(), "rebuilt inventory bins");
            bins
        })
    }

    /// Returns true while the type index is built and current.
    pub fn is_binned(&self) -> bool {
        self.binned.get().is_some()
    }

    fn may_hold(&self, what: &ItemTypeId) -> bool {
        what.is_any() || self.binned().contains_key(what)
    }
}

impl Visitable for Inventory {
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        walk_all(self.items(), visitor)
    }

    fn amount_of_with(
        &self,
        what: &ItemTypeId,
        include_pseudo: bool,
        limit: u32,
        filter: &dyn Fn(&Item) -> bool,
    ) -> u32 {
        if !self.may_hold(what) {
            return 0;
        }
        amount_walk(self, what, include_pseudo, limit, filter)
    }

    fn charges_of_with(
        &self,
        what: &ItemTypeId,
        limit: u32,
        filter: &dyn Fn(&Item) -> bool,
    ) -> u32 {
        if !self.may_hold(what) {
            return 0;
        }
        charges_walk(self, what, limit, filter)
    }
}

/// Removal keeps each stack's letter; stacks emptied by it are dropped.
impl VisitableMut for Inventory {
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let mut remaining = count;
        let mut removed = Vec::new();
        for stack in &mut self.stacks {
            if remove_matching(&mut stack.items, filter, &mut remaining, &mut removed).is_abort() {
                break;
            }
        }
        self.stacks.retain(|s| !s.is_empty());
        removed
    }

    fn derived_caches(&self) -> Caches {
        Caches::BINNED
    }

    fn invalidate_caches(&mut self, caches: Caches) {
        if caches.contains(Caches::BINNED) {
            self.binned.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::fixtures::spawn;
    use crate::item::ItemSpawner;

    fn stocked() -> (Inventory, ItemSpawner) {
        let mut spawner = ItemSpawner::new();
        let mut inv = Inventory::new();
        let mut pack = spawn(&mut spawner, "backpack");
        pack.put_in_container(spawn(&mut spawner, "hammer")).unwrap();
        inv.add_with_invlet(pack, 'a');
        inv.add_with_invlet(spawn(&mut spawner, "rock"), 'b');
        inv.add(spawn(&mut spawner, "rock"));
        inv.add(spawn(&mut spawner, "thread"));
        (inv, spawner)
    }

    #[test]
    fn same_type_items_share_a_stack() {
        let (inv, _) = stocked();
        assert_eq!(inv.stacks().len(), 3);
        assert_eq!(inv.stack_by_invlet('b').map(InventoryStack::len), Some(2));
    }

    #[test]
    fn bins_include_nested_items() {
        let (inv, _) = stocked();
        assert!(inv.binned().contains_key(&ItemTypeId::from("hammer")));
        assert_eq!(inv.binned()[&ItemTypeId::from("rock")].len(), 2);
    }

    #[test]
    fn absent_type_fails_fast() {
        let (inv, _) = stocked();
        assert_eq!(inv.amount_of(&ItemTypeId::from("jeans"), false, 10), 0);
        assert_eq!(inv.charges_of(&ItemTypeId::from("battery"), 10), 0);
        assert_eq!(inv.amount_of(&ItemTypeId::from("rock"), false, 10), 2);
        assert_eq!(inv.charges_of(&ItemTypeId::from("thread"), 100), 50);
    }

    #[test]
    fn removal_drops_bins_and_keeps_partial_stack_letter() {
        let (mut inv, _) = stocked();
        let rock = ItemTypeId::from("rock");
        inv.binned();

        let removed = inv.remove_items_with(&mut |i| *i.type_id() == rock, 1);
        assert_eq!(removed.len(), 1);
        assert!(!inv.is_binned());
        assert_eq!(inv.stack_by_invlet('b').map(InventoryStack::len), Some(1));

        inv.remove_items_with(&mut |i| *i.type_id() == rock, 5);
        assert!(inv.stack_by_invlet('b').is_none());
        assert_eq!(inv.stacks().len(), 2);
    }

    #[test]
    fn nothing_removed_keeps_bins() {
        let (mut inv, _) = stocked();
        inv.binned();
        let removed = inv.remove_items_with(&mut |i| *i.type_id() == ItemTypeId::from("jeans"), 3);
        assert!(removed.is_empty());
        assert!(inv.is_binned());
    }
}
