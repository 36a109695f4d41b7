use bitflags::bitflags;

bitflags! {
    /// Derived state a container keeps about its items.
    ///
    /// Structural removals invalidate the caches a container reports through
    /// [`super::VisitableMut::derived_caches`] within the same call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Caches: u8 {
        /// Index from item type to item uids.
        const BINNED       = 1 << 0;
        /// Total vehicle mass.
        const MASS         = 1 << 1;
        /// Light emitted by a tile's items.
        const LUMINOSITY   = 1 << 2;
        /// Uids of items that need per-turn processing.
        const ACTIVE_ITEMS = 1 << 3;
    }
}
