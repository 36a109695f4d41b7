//! Child enumeration traits.
//!
//! A tree only needs to expose its traversable children. Storage that a
//! node owns but does not want walked generically (fixed mounts, magazines)
//! is simply left out of [`Node::children`].

/// A node whose traversable children can be enumerated in a fixed order.
pub trait Node {
    /// Returns the children that generic walks descend into, in visit order.
    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// A node whose traversable child lists can be edited in place.
///
/// The lists returned here must cover exactly the children yielded by
/// [`Node::children`], in the same order.
pub trait NodeMut: Node + Sized {
    /// Returns the mutable child lists that detaching walks operate on.
    fn child_lists_mut(&mut self) -> impl Iterator<Item = &mut Vec<Self>>;
}
