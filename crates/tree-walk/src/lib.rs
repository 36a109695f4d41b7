//! Short-circuiting recursive traversal for owned trees.
//!
//! This library provides the visit primitive shared by every container of
//! items: a caller-supplied visitor decides, per node, whether the walk
//! descends, skips the node's children, or stops altogether.
//!
//! - **Synchronous**: every walk runs to completion on the caller's thread
//! - **Three-way control**: [`VisitResponse::Next`], [`VisitResponse::Skip`], [`VisitResponse::Abort`]
//! - **Owned children**: nodes own their children by value, so cycles cannot be built
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Node`] / [`NodeMut`]: Child enumeration for read-only and detaching walks
//! - [`VisitResponse`]: Per-node traversal decision
//! - [`walk`] / [`walk_all`]: Recursive visit of one root or a sequence of roots
//! - [`remove_matching`] / [`remove_from_children`]: Bounded detach of matching nodes

pub mod node;
pub mod remove;
pub mod response;
pub mod walk;

// Re-export core types for ergonomic API
pub use node::{Node, NodeMut};
pub use remove::{remove_from_children, remove_matching};
pub use response::VisitResponse;
pub use walk::{walk, walk_all};
