//! The container capability and the queries derived from it.
//!
//! Every container of items implements [`Visitable`] by enumerating its
//! item roots, in a fixed order, through the shared walk in `tree_walk`.
//! Every query in this module is then written once against that walk, each
//! with its own aggregation and early-termination policy:
//!
//! | Query | Policy |
//! |---|---|
//! | [`Visitable::amount_of`] | count of matching non-broken items, stops at `limit` |
//! | [`Visitable::charges_of`] | saturating sum of charges, descends containers only |
//! | [`Visitable::has_quality`] | saturating count of items meeting a level |
//! | [`Visitable::max_quality`] | maximum rating, `None` when nothing qualifies |
//! | [`Visitable::items_with`] | filtered collection in traversal order |
//! | [`Visitable::find_parent`] | first match, reports the enclosing item |
//! | [`Visitable::kcal_range`] | min/max effective calories, `None` when no match |
//!
//! Containers that can be edited also implement [`VisitableMut`], whose
//! removal contract includes invalidating the container's derived caches.
mod cache;
mod item;
mod queries;
mod reference;

pub use cache::Caches;
pub use reference::SafeItemRef;

pub(crate) use queries::{
    amount_walk, charges_walk, max_quality_walk, quality_count_walk, quality_of,
};

use tree_walk::VisitResponse;

use crate::env::{ItemOracle, NutritionRules};
use crate::item::{Item, ItemTypeId, QualityId};

/// Visitor callback: receives each node and its immediate parent (`None`
/// for container roots).
pub type Visitor<'v, 'a> = dyn FnMut(&'a Item, Option<&'a Item>) -> VisitResponse + 'v;

/// A container whose items can be walked.
///
/// Only [`Visitable::visit_items`] is required; every other method is a
/// query derived from it. Containers with extra item sources (bionics,
/// vehicle part fixtures) override the quality and charge queries.
pub trait Visitable {
    /// Walks every reachable item in this container's canonical order.
    ///
    /// # Returns
    ///
    /// `VisitResponse::Abort` if the visitor aborted, otherwise
    /// `VisitResponse::Next`.
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse;

    /// Returns true if the exact item instance `it` is reachable.
    fn has_item(&self, it: &Item) -> bool {
        let uid = it.uid();
        self.visit_items(&mut |node, _| VisitResponse::continue_if(node.uid() != uid))
            .is_abort()
    }

    /// Returns true if any reachable item satisfies `filter`.
    fn has_item_with(&self, filter: &dyn Fn(&Item) -> bool) -> bool {
        self.visit_items(&mut |node, _| VisitResponse::continue_if(!filter(node)))
            .is_abort()
    }

    /// Every reachable item satisfying `filter`, in traversal order.
    fn items_with<'a>(&'a self, filter: &dyn Fn(&Item) -> bool) -> Vec<&'a Item> {
        let mut found = Vec::new();
        self.visit_items(&mut |node, _| {
            if filter(node) {
                found.push(node);
            }
            VisitResponse::Next
        });
        found
    }

    /// Every reachable item, in traversal order.
    fn all_items<'a>(&'a self) -> Vec<&'a Item> {
        self.items_with(&|_| true)
    }

    /// The container's root items, without descending into them.
    fn top_level<'a>(&'a self) -> Vec<&'a Item> {
        let mut roots = Vec::new();
        self.visit_items(&mut |node, _| {
            roots.push(node);
            VisitResponse::Skip
        });
        roots
    }

    /// The item whose container pocket holds `it`.
    ///
    /// Returns `None` both for roots (no parent) and for items that are not
    /// reachable at all; the latter is logged as a warning.
    fn find_parent<'a>(&'a self, it: &Item) -> Option<&'a Item> {
        let uid = it.uid();
        let mut found = false;
        let mut result = None;
        self.visit_items(&mut |node, parent| {
            if node.uid() == uid {
                found = true;
                result = parent;
                VisitResponse::Abort
            } else {
                VisitResponse::Next
            }
        });

        if !found {
            tracing::warn!(item = %uid, type_id = %it.type_id(), "find_parent: item not in container");
        }
        result
    }

    /// Ancestors of `it`, nearest first, up to the container root.
    fn parents<'a>(&'a self, it: &Item) -> Vec<&'a Item> {
        let mut chain = Vec::new();
        let mut current = self.find_parent(it);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.find_parent(parent);
        }
        chain
    }

    /// Number of non-broken items of type `what`, capped at `limit`.
    ///
    /// `ItemTypeId::ANY` matches every type. Pseudo items are only counted
    /// when `include_pseudo` is set.
    fn amount_of(&self, what: &ItemTypeId, include_pseudo: bool, limit: u32) -> u32 {
        self.amount_of_with(what, include_pseudo, limit, &|_| true)
    }

    /// [`Visitable::amount_of`] restricted to items satisfying `filter`.
    fn amount_of_with(
        &self,
        what: &ItemTypeId,
        include_pseudo: bool,
        limit: u32,
        filter: &dyn Fn(&Item) -> bool,
    ) -> u32 {
        amount_walk(self, what, include_pseudo, limit, filter)
    }

    /// True if at least `qty` items of type `what` are present.
    fn has_amount(&self, what: &ItemTypeId, qty: u32, include_pseudo: bool) -> bool {
        self.amount_of(what, include_pseudo, qty) == qty
    }

    /// Saturating sum of charges of non-broken items of type `what`,
    /// capped at `limit`.
    ///
    /// Only container items are descended into; a tool's loaded magazine or
    /// other internals never contribute.
    fn charges_of(&self, what: &ItemTypeId, limit: u32) -> u32 {
        self.charges_of_with(what, limit, &|_| true)
    }

    /// [`Visitable::charges_of`] restricted to items satisfying `filter`.
    fn charges_of_with(
        &self,
        what: &ItemTypeId,
        limit: u32,
        filter: &dyn Fn(&Item) -> bool,
    ) -> u32 {
        charges_walk(self, what, limit, filter)
    }

    /// True if at least `qty` charges of type `what` are present.
    fn has_charges(&self, what: &ItemTypeId, qty: u32) -> bool {
        qty == 0 || self.charges_of(what, qty) >= qty
    }

    /// Highest rating of `quality` among reachable items.
    ///
    /// `None` means nothing here provides the quality at all, which is
    /// distinct from a rating of zero.
    fn max_quality(&self, items: &dyn ItemOracle, quality: &QualityId) -> Option<i32> {
        max_quality_walk(self, items, quality)
    }

    /// True if at least `qty` units rate `level` or better in `quality`.
    fn has_quality(
        &self,
        items: &dyn ItemOracle,
        quality: &QualityId,
        level: i32,
        qty: u32,
    ) -> bool {
        qty == 0 || quality_count_walk(self, items, quality, level, qty) >= qty
    }

    /// Minimum and maximum effective calories among items of type `what`
    /// that satisfy `filter`, computed with `rules`.
    ///
    /// Returns `None` when no item matches.
    fn kcal_range(
        &self,
        items: &dyn ItemOracle,
        what: &ItemTypeId,
        filter: &dyn Fn(&Item) -> bool,
        rules: &dyn NutritionRules,
    ) -> Option<(i32, i32)> {
        queries::kcal_walk(self, items, what, filter, rules)
    }
}

/// A container whose item trees can be edited.
///
/// Implementors provide the raw detach and their cache bookkeeping;
/// [`VisitableMut::remove_items_with`] ties them together so that every
/// removal leaves the container's derived caches consistent.
pub trait VisitableMut: Visitable {
    /// Detaches up to `count` matching items without touching caches.
    ///
    /// Call [`VisitableMut::remove_items_with`] instead unless the caller
    /// invalidates caches itself.
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item>;

    /// Caches this container derives from its items.
    fn derived_caches(&self) -> Caches {
        Caches::empty()
    }

    /// Drops or recomputes the given derived caches.
    fn invalidate_caches(&mut self, _caches: Caches) {}

    /// Detaches up to `count` items satisfying `filter` and hands ownership
    /// to the caller.
    ///
    /// # Postconditions
    ///
    /// - at most `count` items are returned and each satisfies `filter`
    /// - if anything was removed, every cache in
    ///   [`VisitableMut::derived_caches`] has been invalidated
    fn remove_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let removed = self.detach_items_with(filter, count);
        if !removed.is_empty() {
            let caches = self.derived_caches();
            tracing::debug!(removed = removed.len(), ?caches, "detached items, invalidating caches");
            self.invalidate_caches(caches);
        }
        removed
    }

    /// Detaches the exact item instance `it`, if reachable.
    fn remove_item(&mut self, it: &Item) -> Option<Item> {
        let uid = it.uid();
        self.remove_items_with(&mut |node| node.uid() == uid, 1).pop()
    }
}
