//! Item construction errors.

use crate::error::{CoreError, ErrorSeverity};

use super::{ItemTypeId, ItemUid, PocketKind};

/// Errors raised while building or filling item trees.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// No definition exists for the requested type.
    #[error("unknown item type '{0}'")]
    UnknownType(ItemTypeId),

    /// The target item has no pocket of the requested kind.
    #[error("item {item} has no {kind} pocket")]
    NoPocket { item: ItemUid, kind: PocketKind },

    /// Every pocket of the requested kind is sealed.
    #[error("{kind} pocket of item {item} is sealed")]
    PocketSealed { item: ItemUid, kind: PocketKind },
}

impl CoreError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        use ItemError::*;
        match self {
            UnknownType(_) | NoPocket { .. } => ErrorSeverity::Validation,
            PocketSealed { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use ItemError::*;
        match self {
            UnknownType(_) => "ITEM_UNKNOWN_TYPE",
            NoPocket { .. } => "ITEM_NO_POCKET",
            PocketSealed { .. } => "ITEM_POCKET_SEALED",
        }
    }
}
