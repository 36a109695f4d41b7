//! Identifiers for item instances, item types and tool qualities.

use std::borrow::Cow;
use std::fmt;

/// Identity of one item instance.
///
/// Allocated monotonically by [`super::ItemSpawner`] and never reused, so a
/// uid that no longer resolves inside a container cannot silently alias a
/// newer item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemUid(pub u64);

impl fmt::Display for ItemUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to an item type definition (lookup via [`crate::ItemOracle`]).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemTypeId(Cow<'static, str>);

impl ItemTypeId {
    /// Wildcard accepted by amount queries: matches every item type.
    pub const ANY: Self = Self::from_static("any");
    /// Virtual power-cell type; charge queries for it also count UPS units
    /// and bionic power.
    pub const UPS: Self = Self::from_static("UPS");
    /// A switched-off standard UPS unit.
    pub const UPS_OFF: Self = Self::from_static("UPS_off");
    /// A switched-off advanced UPS unit.
    pub const ADV_UPS_OFF: Self = Self::from_static("adv_UPS_off");

    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the `"any"` wildcard.
    pub fn is_any(&self) -> bool {
        *self == Self::ANY
    }
}

impl From<&str> for ItemTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tool quality identifier (e.g. `CUT`, `HAMMER`, `BUTCHER`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QualityId(Cow<'static, str>);

impl QualityId {
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QualityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for QualityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
