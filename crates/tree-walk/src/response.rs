//! Decision returned by visitor functions.

/// The result of visiting a single node.
///
/// # Semantics
///
/// - `Next`: visit the node's children, then its later siblings
/// - `Skip`: do not descend into this node, but continue with its siblings
/// - `Abort`: stop the entire walk; no further node is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitResponse {
    /// Descend into the node's children.
    Next,

    /// Skip the node's children but keep visiting siblings.
    Skip,

    /// Stop the whole walk immediately.
    Abort,
}

impl VisitResponse {
    /// Returns `true` if this response stops the walk.
    #[inline]
    pub fn is_abort(self) -> bool {
        matches!(self, VisitResponse::Abort)
    }

    /// Returns `true` if this response allows descending into children.
    #[inline]
    pub fn descends(self) -> bool {
        matches!(self, VisitResponse::Next)
    }

    /// Maps a boolean "keep going" predicate onto `Next`/`Abort`.
    #[inline]
    pub fn continue_if(keep_going: bool) -> Self {
        if keep_going {
            VisitResponse::Next
        } else {
            VisitResponse::Abort
        }
    }
}
