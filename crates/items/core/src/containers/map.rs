//! Map tiles holding item stacks, plus tile cursors and area selectors.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};

use tree_walk::{VisitResponse, remove_matching, walk_all};

use crate::common::Position;
use crate::env::{MapDimensions, MapOracle};
use crate::item::{Item, ItemFlags, ItemUid};
use crate::visitable::{Caches, Visitable, VisitableMut, Visitor};
use crate::world::WorldError;

/// Items lying on one tile, with the light they emit and the uids of
/// active items among them.
#[derive(Clone, Debug, Default)]
pub struct TileStack {
    items: Vec<Item>,
    luminosity: u32,
    active: BTreeSet<ItemUid>,
}

impl TileStack {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Sum of the light emitted by the items on the tile.
    pub fn luminosity(&self) -> u32 {
        self.luminosity
    }

    /// Uids of every item on the tile, nested ones included, flagged active.
    pub fn active_items(&self) -> &BTreeSet<ItemUid> {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, item: Item) {
        self.luminosity = self.luminosity.saturating_add(u32::from(item.light));
        self.active.extend(active_uids(std::slice::from_ref(&item)));
        self.items.push(item);
    }

    fn refresh(&mut self, caches: Caches) {
        if caches.contains(Caches::LUMINOSITY) {
            self.luminosity = self
                .items
                .iter()
                .fold(0u32, |sum, i| sum.saturating_add(u32::from(i.light)));
        }
        if caches.contains(Caches::ACTIVE_ITEMS) {
            self.active = active_uids(&self.items);
        }
    }
}

fn active_uids(roots: &[Item]) -> BTreeSet<ItemUid> {
    let mut active = BTreeSet::new();
    walk_all(roots, &mut |node, _| {
        if node.has_flag(ItemFlags::ACTIVE) {
            active.insert(node.uid());
        }
        VisitResponse::Next
    });
    active
}

/// Whether the layout lets anyone see the items at `position`.
fn exposes(layout: &dyn MapOracle, position: Position) -> bool {
    !layout.tile(position).is_some_and(|tile| tile.hides_items())
}

/// Item stacks of a map, keyed by position.
///
/// Only positions that hold items are stored. The static layout (terrain,
/// furniture flags) is not part of the map; cursors and selectors take it
/// as a [`MapOracle`].
#[derive(Clone, Debug)]
pub struct ItemMap {
    dimensions: MapDimensions,
    tiles: BTreeMap<Position, TileStack>,
}

impl ItemMap {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            tiles: BTreeMap::new(),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn tile(&self, position: Position) -> Option<&TileStack> {
        self.tiles.get(&position)
    }

    /// Tiles holding at least one item, in position order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &TileStack)> {
        self.tiles.iter().map(|(pos, tile)| (*pos, tile))
    }

    /// Drops `item` on top of the stack at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::OutOfBounds` if `position` is outside the map.
    pub fn add_item(&mut self, position: Position, item: Item) -> Result<(), WorldError> {
        if !self.dimensions.contains(position) {
            return Err(WorldError::OutOfBounds(position));
        }
        self.tiles.entry(position).or_default().push(item);
        Ok(())
    }

    pub fn cursor<'l>(&self, layout: &'l dyn MapOracle, position: Position) -> MapCursor<'l, &Self> {
        MapCursor::new(self, layout, position)
    }

    pub fn cursor_mut<'l>(
        &mut self,
        layout: &'l dyn MapOracle,
        position: Position,
    ) -> MapCursor<'l, &mut Self> {
        MapCursor::new(self, layout, position)
    }

    pub fn select<'l>(
        &self,
        layout: &'l dyn MapOracle,
        center: Position,
        radius: u32,
        accessible_only: bool,
    ) -> MapSelector<'l, &Self> {
        MapSelector::new(self, layout, center, radius, accessible_only)
    }

    pub fn select_mut<'l>(
        &mut self,
        layout: &'l dyn MapOracle,
        center: Position,
        radius: u32,
        accessible_only: bool,
    ) -> MapSelector<'l, &mut Self> {
        MapSelector::new(self, layout, center, radius, accessible_only)
    }

    /// Items at `position` that the layout leaves visible; empty for
    /// sealed tiles.
    pub fn visible_items(&self, layout: &dyn MapOracle, position: Position) -> &[Item] {
        match self.tiles.get(&position) {
            Some(tile) if exposes(layout, position) => &tile.items,
            _ => &[],
        }
    }

    fn visit_tile<'a>(
        &'a self,
        layout: &dyn MapOracle,
        position: Position,
        visitor: &mut Visitor<'_, 'a>,
    ) -> VisitResponse {
        walk_all(self.visible_items(layout, position), visitor)
    }

    fn detach_from_tile(
        &mut self,
        layout: &dyn MapOracle,
        position: Position,
        filter: &mut dyn FnMut(&Item) -> bool,
        remaining: &mut usize,
        removed: &mut Vec<Item>,
    ) -> VisitResponse {
        if !exposes(layout, position) {
            return VisitResponse::Next;
        }
        match self.tiles.get_mut(&position) {
            Some(tile) => remove_matching(&mut tile.items, filter, remaining, removed),
            None => VisitResponse::Next,
        }
    }

    fn refresh_tile(&mut self, position: Position, caches: Caches) {
        let Some(tile) = self.tiles.get_mut(&position) else {
            return;
        };
        if tile.is_empty() {
            self.tiles.remove(&position);
            tracing::trace!("tile {} emptied", position);
        } else {
            tile.refresh(caches);
        }
    }
}

/// A view of the items on one map tile.
///
/// A tile whose furniture is sealed (and does not hold liquids) is opaque:
/// it visits nothing and yields nothing to removal.
pub struct MapCursor<'l, M> {
    map: M,
    layout: &'l dyn MapOracle,
    position: Position,
}

impl<'l, M> MapCursor<'l, M>
where
    M: Deref<Target = ItemMap>,
{
    pub fn new(map: M, layout: &'l dyn MapOracle, position: Position) -> Self {
        Self {
            map,
            layout,
            position,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn map(&self) -> &ItemMap {
        &self.map
    }
}

impl<M> Visitable for MapCursor<'_, M>
where
    M: Deref<Target = ItemMap>,
{
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        self.map.visit_tile(self.layout, self.position, visitor)
    }
}

impl<M> VisitableMut for MapCursor<'_, M>
where
    M: DerefMut<Target = ItemMap>,
{
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        if !self.map.dimensions().contains(self.position) {
            tracing::error!(
                position = %self.position,
                "cannot remove items through an out-of-bounds map cursor"
            );
            return Vec::new();
        }

        let mut remaining = count;
        let mut removed = Vec::new();
        self.map
            .detach_from_tile(self.layout, self.position, filter, &mut remaining, &mut removed);
        removed
    }

    fn derived_caches(&self) -> Caches {
        Caches::LUMINOSITY | Caches::ACTIVE_ITEMS
    }

    fn invalidate_caches(&mut self, caches: Caches) {
        let position = self.position;
        self.map.refresh_tile(position, caches);
    }
}

/// Every tile within a radius of a center, nearest first.
///
/// Tiles at equal distance are ordered by row, then column. With
/// `accessible_only`, tiles that can neither be entered nor reached into
/// are left out; the center itself is always kept.
pub struct MapSelector<'l, M> {
    map: M,
    layout: &'l dyn MapOracle,
    positions: Vec<Position>,
}

impl<'l, M> MapSelector<'l, M>
where
    M: Deref<Target = ItemMap>,
{
    pub fn new(
        map: M,
        layout: &'l dyn MapOracle,
        center: Position,
        radius: u32,
        accessible_only: bool,
    ) -> Self {
        let dimensions = map.dimensions();
        let positions = center
            .closest_first(radius, dimensions)
            .into_iter()
            .filter(|pos| {
                !accessible_only
                    || *pos == center
                    || layout.tile(*pos).is_some_and(|tile| tile.is_accessible())
            })
            .collect();
        Self {
            map,
            layout,
            positions,
        }
    }

    /// Member tiles in visiting order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl<M> Visitable for MapSelector<'_, M>
where
    M: Deref<Target = ItemMap>,
{
    fn visit_items<'a>(&'a self, visitor: &mut Visitor<'_, 'a>) -> VisitResponse {
        for position in &self.positions {
            if self.map.visit_tile(self.layout, *position, visitor).is_abort() {
                return VisitResponse::Abort;
            }
        }
        VisitResponse::Next
    }
}

impl<M> VisitableMut for MapSelector<'_, M>
where
    M: DerefMut<Target = ItemMap>,
{
    fn detach_items_with(
        &mut self,
        filter: &mut dyn FnMut(&Item) -> bool,
        count: usize,
    ) -> Vec<Item> {
        let mut remaining = count;
        let mut removed = Vec::new();
        for position in &self.positions {
            let done = self
                .map
                .detach_from_tile(self.layout, *position, filter, &mut remaining, &mut removed)
                .is_abort();
            if done {
                break;
            }
        }
        removed
    }

    fn derived_caches(&self) -> Caches {
        Caches::LUMINOSITY | Caches::ACTIVE_ITEMS
    }

    fn invalidate_caches(&mut self, caches: Caches) {
        for position in &self.positions {
            self.map.refresh_tile(*position, caches);
        }
    }
}
