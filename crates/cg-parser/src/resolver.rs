//! Parent inference over an indentation outline.
//!
//! The resolver walks one block forward while holding the chain of open
//! ancestors. The root seeds the chain at depth 0, so after the root the
//! chain position of an entry equals its depth whenever indentation is
//! regular. Irregular indentation is never rejected:
//!
//! - a child attaches to the most recent chain entry that is strictly
//!   shallower than itself;
//! - when the chain length differs from the child's depth the chain is cut to
//!   `depth` entries before the child is pushed, otherwise the child is pushed
//!   as a sibling.

/// Returns the parent index of every entry in `depths`.
///
/// Entry 0 is the root and never has a parent; its own depth is ignored and
/// treated as 0. Any other entry gets `None` only when no shallower entry is
/// left on the ancestor chain, which makes it a disconnected root-level node.
#[must_use]
pub(crate) fn infer_parents(depths: &[usize]) -> Vec<Option<usize>> {
    let mut parents = Vec::with_capacity(depths.len());
    if depths.is_empty() {
        return parents;
    }

    // (entry index, depth)
    let mut chain: Vec<(usize, usize)> = vec![(0, 0)];
    parents.push(None);

    for (index, &depth) in depths.iter().enumerate().skip(1) {
        let parent = chain
            .iter()
            .rev()
            .find(|(_, open_depth)| *open_depth < depth)
            .map(|(open_index, _)| *open_index);
        parents.push(parent);

        if chain.len() != depth {
            chain.truncate(depth);
        }
        chain.push((index, depth));
    }

    parents
}

#[cfg(test)]
mod tests {
    use super::infer_parents;

    #[test]
    fn regular_outline_builds_a_tree() {
        // root, A, B, C under B
        assert_eq!(
            infer_parents(&[0, 1, 1, 2]),
            vec![None, Some(0), Some(0), Some(2)]
        );
    }

    #[test]
    fn returning_to_a_shallower_level_reattaches() {
        // root, A, A1, A1a, B, B1
        assert_eq!(
            infer_parents(&[0, 1, 2, 3, 1, 2]),
            vec![None, Some(0), Some(1), Some(2), Some(0), Some(4)]
        );
    }

    #[test]
    fn depth_skip_attaches_to_nearest_shallower_entry() {
        // root, A, X three levels below A
        assert_eq!(
            infer_parents(&[0, 1, 4]),
            vec![None, Some(0), Some(1)]
        );
    }

    #[test]
    fn sibling_after_skip_finds_the_skipped_parent() {
        // root, A, X(4), Y(4): Y is not nested under X
        assert_eq!(
            infer_parents(&[0, 1, 4, 4]),
            vec![None, Some(0), Some(1), Some(1)]
        );
    }

    #[test]
    fn depth_zero_entries_are_disconnected() {
        assert_eq!(
            infer_parents(&[0, 1, 0, 1]),
            vec![None, Some(0), None, Some(2)]
        );
    }

    #[test]
    fn root_depth_is_ignored() {
        assert_eq!(infer_parents(&[2, 1]), vec![None, Some(0)]);
    }

    #[test]
    fn empty_and_root_only_inputs() {
        assert!(infer_parents(&[]).is_empty());
        assert_eq!(infer_parents(&[0]), vec![None]);
    }
}
