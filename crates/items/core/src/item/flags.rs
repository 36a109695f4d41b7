use bitflags::bitflags;

bitflags! {
    /// Per-instance item state bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ItemFlags: u8 {
        /// Virtual tool provided by a bionic or fixture; not a real object.
        const PSEUDO = 1 << 0;
        /// Item is switched on and must be processed every turn.
        const ACTIVE = 1 << 1;
        const FILTHY = 1 << 2;
        /// Food past its shelf life.
        const ROTTEN = 1 << 3;
    }
}
