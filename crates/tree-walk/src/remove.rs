//! Bounded detaching walks.
//!
//! Removal moves matching nodes out of their owning list and hands them to
//! the caller. A matching node is detached whole, so its own children are
//! never examined; a non-matching node is descended into.

use crate::{NodeMut, VisitResponse};

/// Detaches up to `*remaining` nodes matching `filter` from `list` and its
/// descendants, appending them to `out` in traversal order.
///
/// `remaining` is decremented for every detached node.
///
/// # Returns
///
/// - `VisitResponse::Abort` once `*remaining` reaches zero
/// - `VisitResponse::Next` if the list was exhausted first
pub fn remove_matching<N, F>(
    list: &mut Vec<N>,
    filter: &mut F,
    remaining: &mut usize,
    out: &mut Vec<N>,
) -> VisitResponse
where
    N: NodeMut,
    F: FnMut(&N) -> bool + ?Sized,
{
    if *remaining == 0 {
        return VisitResponse::Abort;
    }

    let mut idx = 0;
    while idx < list.len() {
        if filter(&list[idx]) {
            out.push(list.remove(idx));
            *remaining -= 1;
            if *remaining == 0 {
                return VisitResponse::Abort;
            }
        } else {
            if remove_from_children(&mut list[idx], filter, remaining, out).is_abort() {
                return VisitResponse::Abort;
            }
            idx += 1;
        }
    }

    VisitResponse::Next
}

/// Runs [`remove_matching`] over every child list of `node`, leaving the
/// node itself in place.
pub fn remove_from_children<N, F>(
    node: &mut N,
    filter: &mut F,
    remaining: &mut usize,
    out: &mut Vec<N>,
) -> VisitResponse
where
    N: NodeMut,
    F: FnMut(&N) -> bool + ?Sized,
{
    for list in node.child_lists_mut() {
        if remove_matching(list, filter, remaining, out).is_abort() {
            return VisitResponse::Abort;
        }
    }
    VisitResponse::Next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    #[derive(Debug, PartialEq)]
    struct Tree {
        value: u32,
        kids: Vec<Tree>,
    }

    impl Tree {
        fn leaf(value: u32) -> Self {
            Self {
                value,
                kids: Vec::new(),
            }
        }
    }

    impl Node for Tree {
        fn children(&self) -> impl Iterator<Item = &Self> {
            self.kids.iter()
        }
    }

    impl NodeMut for Tree {
        fn child_lists_mut(&mut self) -> impl Iterator<Item = &mut Vec<Self>> {
            std::iter::once(&mut self.kids)
        }
    }

    fn values(list: &[Tree]) -> Vec<u32> {
        list.iter().map(|t| t.value).collect()
    }

    #[test]
    fn removes_at_most_count_matches() {
        let mut list = vec![Tree::leaf(2), Tree::leaf(1), Tree::leaf(2), Tree::leaf(2)];
        let mut remaining = 2;
        let mut out = Vec::new();
        let result = remove_matching(&mut list, &mut |t: &Tree| t.value == 2, &mut remaining, &mut out);

        assert_eq!(result, VisitResponse::Abort);
        assert_eq!(values(&out), [2, 2]);
        assert_eq!(values(&list), [1, 2]);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn descends_into_non_matching_nodes_only() {
        let mut list = vec![
            Tree {
                value: 7,
                kids: vec![Tree::leaf(7)],
            },
            Tree {
                value: 1,
                kids: vec![Tree::leaf(7), Tree::leaf(3)],
            },
        ];
        let mut remaining = usize::MAX;
        let mut out = Vec::new();
        let result = remove_matching(&mut list, &mut |t: &Tree| t.value == 7, &mut remaining, &mut out);

        assert_eq!(result, VisitResponse::Next);
        // the first 7 leaves with its child still attached
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kids.len(), 1);
        assert_eq!(values(&list), [1]);
        assert_eq!(values(&list[0].kids), [3]);
    }

    #[test]
    fn zero_budget_removes_nothing() {
        let mut list = vec![Tree::leaf(1)];
        let mut remaining = 0;
        let mut out = Vec::new();
        remove_matching(&mut list, &mut |_: &Tree| true, &mut remaining, &mut out);
        assert!(out.is_empty());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn children_only_keeps_root() {
        let mut root = Tree {
            value: 5,
            kids: vec![Tree::leaf(5), Tree::leaf(6)],
        };
        let mut remaining = 10;
        let mut out = Vec::new();
        remove_from_children(&mut root, &mut |t: &Tree| t.value == 5, &mut remaining, &mut out);
        assert_eq!(values(&out), [5]);
        assert_eq!(values(&root.kids), [6]);
        assert_eq!(remaining, 9);
    }
}
