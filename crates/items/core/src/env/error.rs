//! Oracle construction errors.

use crate::common::Position;
use crate::error::{CoreError, ErrorSeverity};
use crate::item::ItemTypeId;

/// Errors that occur while building oracle data.
///
/// Oracle data is static, so these are raised once at load time and are
/// never produced by queries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// Two definitions share the same type id.
    #[error("duplicate item type '{0}'")]
    DuplicateType(ItemTypeId),

    /// Position is outside the layout bounds.
    #[error("position {0} is out of layout bounds")]
    PositionOutOfBounds(Position),

    /// Row-major tile data does not match the declared dimensions.
    #[error("layout expects {expected} tiles, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
}

impl CoreError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            DuplicateType(_) => "ORACLE_DUPLICATE_TYPE",
            PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
            TileCountMismatch { .. } => "ORACLE_TILE_COUNT_MISMATCH",
        }
    }
}
