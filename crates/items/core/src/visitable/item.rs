use tree_walk::{VisitResponse, remove_from_children, walk};

use super::{Visitable, VisitableMut, Visitor};
use crate::item::Item;

/// A single item visits itself first, then its container contents.
impl Visitable for Item {
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        walk(self, None, visitor)
    }
}

/// Removal from an item only detaches contents; the item itself stays.
impl VisitableMut for Item {
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let mut remaining = count;
        let mut removed = Vec::new();
        remove_from_children(self, filter, &mut remaining, &mut removed);
        removed
    }
}
