//! Walks shared by the default query implementations and their overrides.

use tree_walk::VisitResponse;

use super::Visitable;
use crate::env::{ItemOracle, NutritionRules};
use crate::item::{Item, ItemTypeId, QualityId};

/// Rating of `quality` on `item`, looked up through its type.
pub(crate) fn quality_of(items: &dyn ItemOracle, item: &Item, quality: &QualityId) -> Option<i32> {
    match items.definition(item.type_id()) {
        Some(ty) => ty.quality(quality),
        None => {
            tracing::warn!(item = %item.uid(), type_id = %item.type_id(), "no definition for item type");
            None
        }
    }
}

pub(crate) fn amount_walk<V>(
    container: &V,
    what: &ItemTypeId,
    include_pseudo: bool,
    limit: u32,
    filter: &dyn Fn(&Item) -> bool,
) -> u32
where
    V: Visitable + ?Sized,
{
    if limit == 0 {
        return 0;
    }

    let mut qty: u32 = 0;
    container.visit_items(&mut |node, _| {
        if (what.is_any() || node.type_id() == what)
            && !node.is_broken()
            && (include_pseudo || !node.is_pseudo())
            && filter(node)
        {
            qty = qty.saturating_add(1);
        }
        VisitResponse::continue_if(qty < limit)
    });
    qty.min(limit)
}

pub(crate) fn charges_walk<V>(
    container: &V,
    what: &ItemTypeId,
    limit: u32,
    filter: &dyn Fn(&Item) -> bool,
) -> u32
where
    V: Visitable + ?Sized,
{
    if limit == 0 {
        return 0;
    }

    let mut qty: u32 = 0;
    container.visit_items(&mut |node, _| {
        if node.type_id() == what && !node.is_broken() && filter(node) {
            qty = qty.saturating_add(node.charges);
            if qty >= limit {
                return VisitResponse::Abort;
            }
        }
        if node.is_container() {
            VisitResponse::Next
        } else {
            VisitResponse::Skip
        }
    });
    qty.min(limit)
}

pub(crate) fn max_quality_walk<V>(
    container: &V,
    items: &dyn ItemOracle,
    quality: &QualityId,
) -> Option<i32>
where
    V: Visitable + ?Sized,
{
    let mut best: Option<i32> = None;
    container.visit_items(&mut |node, _| {
        if let Some(level) = quality_of(items, node, quality) {
            best = Some(best.map_or(level, |b| b.max(level)));
        }
        VisitResponse::Next
    });
    best
}

/// Saturating count of units rating at least `level`, stopping at `limit`.
pub(crate) fn quality_count_walk<V>(
    container: &V,
    items: &dyn ItemOracle,
    quality: &QualityId,
    level: i32,
    limit: u32,
) -> u32
where
    V: Visitable + ?Sized,
{
    let mut qty: u32 = 0;
    container.visit_items(&mut |node, _| {
        let ty = items.definition(node.type_id());
        if ty.and_then(|ty| ty.quality(quality)).is_some_and(|q| q >= level) {
            qty = qty.saturating_add(node.count(ty));
        }
        VisitResponse::continue_if(qty < limit)
    });
    qty
}

pub(crate) fn kcal_walk<V>(
    container: &V,
    items: &dyn ItemOracle,
    what: &ItemTypeId,
    filter: &dyn Fn(&Item) -> bool,
    rules: &dyn NutritionRules,
) -> Option<(i32, i32)>
where
    V: Visitable + ?Sized,
{
    let mut range: Option<(i32, i32)> = None;
    container.visit_items(&mut |node, _| {
        if node.type_id() != what || !filter(node) {
            return VisitResponse::Next;
        }
        match items.definition(what) {
            Some(ty) => {
                let kcal = rules.kcal(node, ty);
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(kcal), hi.max(kcal)),
                    None => (kcal, kcal),
                });
            }
            None => {
                tracing::warn!(item = %node.uid(), type_id = %what, "kcal_range: no definition for item type");
            }
        }
        VisitResponse::Skip
    });
    range
}
