//! Recursive read-only walks.
//!
//! [`walk`] applies a visitor to one root and its descendants. [`walk_all`]
//! is the sequence composite: it walks each root in order and stops at the
//! first abort, the same way a short-circuited logical AND stops at the
//! first failure.

use crate::{Node, VisitResponse};

/// Visits `node` and, unless told otherwise, all of its descendants.
///
/// The visitor receives each node together with its immediate parent
/// (`parent` for the root, the enclosing node for everything below it).
///
/// # Returns
///
/// - `VisitResponse::Abort` if any invocation in the subtree aborted
/// - `VisitResponse::Next` otherwise (a `Skip` only affects its own subtree)
pub fn walk<'a, N, F>(node: &'a N, parent: Option<&'a N>, visitor: &mut F) -> VisitResponse
where
    N: Node,
    F: FnMut(&'a N, Option<&'a N>) -> VisitResponse + ?Sized,
{
    match visitor(node, parent) {
        VisitResponse::Abort => return VisitResponse::Abort,
        VisitResponse::Skip => return VisitResponse::Next,
        VisitResponse::Next => {}
    }

    for child in node.children() {
        if walk(child, Some(node), visitor).is_abort() {
            return VisitResponse::Abort;
        }
    }

    VisitResponse::Next
}

/// Walks each root in order, reporting them without a parent.
///
/// Stops at the first root whose walk aborts and returns `Abort`.
pub fn walk_all<'a, N, I, F>(roots: I, visitor: &mut F) -> VisitResponse
where
    N: Node + 'a,
    I: IntoIterator<Item = &'a N>,
    F: FnMut(&'a N, Option<&'a N>) -> VisitResponse + ?Sized,
{
    for root in roots {
        if walk(root, None, visitor).is_abort() {
            return VisitResponse::Abort;
        }
    }
    VisitResponse::Next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tree {
        name: &'static str,
        kids: Vec<Tree>,
    }

    impl Tree {
        fn leaf(name: &'static str) -> Self {
            Self {
                name,
                kids: Vec::new(),
            }
        }

        fn branch(name: &'static str, kids: Vec<Tree>) -> Self {
            Self { name, kids }
        }
    }

    impl Node for Tree {
        fn children(&self) -> impl Iterator<Item = &Self> {
            self.kids.iter()
        }
    }

    fn sample() -> Tree {
        Tree::branch(
            "root",
            vec![
                Tree::branch("a", vec![Tree::leaf("a1"), Tree::leaf("a2")]),
                Tree::leaf("b"),
                Tree::branch("c", vec![Tree::leaf("c1")]),
            ],
        )
    }

    #[test]
    fn leaf_root_is_visited_exactly_once() {
        for response in [
            VisitResponse::Next,
            VisitResponse::Skip,
            VisitResponse::Abort,
        ] {
            let leaf = Tree::leaf("only");
            let mut calls = 0;
            walk(&leaf, None, &mut |_: &Tree, _: Option<&Tree>| {
                calls += 1;
                response
            });
            assert_eq!(calls, 1);
        }
    }

    #[test]
    fn visits_depth_first_in_order() {
        let tree = sample();
        let mut seen = Vec::new();
        let result = walk(&tree, None, &mut |node: &Tree, _: Option<&Tree>| {
            seen.push(node.name);
            VisitResponse::Next
        });
        assert_eq!(result, VisitResponse::Next);
        assert_eq!(seen, ["root", "a", "a1", "a2", "b", "c", "c1"]);
    }

    #[test]
    fn parent_is_the_immediate_container() {
        let tree = sample();
        let mut pairs = Vec::new();
        walk(&tree, None, &mut |node: &Tree, parent: Option<&Tree>| {
            pairs.push((node.name, parent.map(|p| p.name)));
            VisitResponse::Next
        });
        assert!(pairs.contains(&("root", None)));
        assert!(pairs.contains(&("a", Some("root"))));
        assert!(pairs.contains(&("a1", Some("a"))));
        assert!(pairs.contains(&("c1", Some("c"))));
    }

    #[test]
    fn skip_prunes_subtree_but_keeps_siblings() {
        let tree = sample();
        let mut seen = Vec::new();
        walk(&tree, None, &mut |node: &Tree, _: Option<&Tree>| {
            seen.push(node.name);
            if node.name == "a" {
                VisitResponse::Skip
            } else {
                VisitResponse::Next
            }
        });
        assert_eq!(seen, ["root", "a", "b", "c", "c1"]);
    }

    #[test]
    fn abort_stops_siblings_and_later_roots() {
        let first = sample();
        let second = Tree::leaf("second");
        let mut seen = Vec::new();
        let result = walk_all([&first, &second], &mut |node: &Tree, _: Option<&Tree>| {
            seen.push(node.name);
            VisitResponse::continue_if(node.name != "a1")
        });
        assert_eq!(result, VisitResponse::Abort);
        assert_eq!(seen, ["root", "a", "a1"]);
    }

    #[test]
    fn walk_all_reports_roots_without_parent() {
        let roots = [Tree::leaf("x"), Tree::leaf("y")];
        let mut parents = Vec::new();
        walk_all(roots.iter(), &mut |_: &Tree, parent: Option<&Tree>| {
            parents.push(parent.is_none());
            VisitResponse::Next
        });
        assert_eq!(parents, [true, true]);
    }
}
