use std::collections::BTreeMap;

use cg_core::Node;

/// Collapses nodes sharing a name.
///
/// The merged node keeps the minimum rank seen and the color of the last
/// occurrence. Output order is the order in which names first appear.
#[must_use]
pub fn dedup_nodes<I>(candidates: I) -> Vec<Node>
where
    I: IntoIterator<Item = Node>,
{
    let mut nodes: Vec<Node> = Vec::new();
    let mut index_by_name: BTreeMap<String, usize> = BTreeMap::new();

    for candidate in candidates {
        if let Some(&index) = index_by_name.get(&candidate.name) {
            let existing = &mut nodes[index];
            existing.rank = existing.rank.min(candidate.rank);
            existing.color = candidate.color;
            continue;
        }
        index_by_name.insert(candidate.name.clone(), nodes.len());
        nodes.push(candidate);
    }

    nodes
}

#[cfg(test)]
mod tests {
    use cg_core::Node;
    use proptest::prelude::*;

    use super::dedup_nodes;

    #[test]
    fn keeps_minimum_rank() {
        let nodes = dedup_nodes([Node::new("X", "red", 3), Node::new("X", "red", 1)]);
        assert_eq!(nodes, vec![Node::new("X", "red", 1)]);
    }

    #[test]
    fn last_color_wins() {
        let nodes = dedup_nodes([
            Node::new("X", "red", 1),
            Node::new("Y", "blue", 2),
            Node::new("X", "green", 2),
        ]);
        assert_eq!(
            nodes,
            vec![Node::new("X", "green", 1), Node::new("Y", "blue", 2)]
        );
    }

    #[test]
    fn distinct_names_pass_through_in_order() {
        let input = vec![Node::new("b", "red", 1), Node::new("a", "red", 2)];
        assert_eq!(dedup_nodes(input.clone()), input);
    }

    fn node_strategy() -> impl Strategy<Value = Node> {
        (
            prop::sample::select(vec!["A", "B", "C", "D"]),
            prop::sample::select(vec!["red", "blue", "green"]),
            0usize..6,
        )
            .prop_map(|(name, color, rank)| Node::new(name, color, rank))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_dedup_is_idempotent(nodes in prop::collection::vec(node_strategy(), 0..24)) {
            let once = dedup_nodes(nodes);
            let twice = dedup_nodes(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_dedup_names_are_unique_with_min_rank(
            nodes in prop::collection::vec(node_strategy(), 0..24)
        ) {
            let merged = dedup_nodes(nodes.clone());
            for node in &merged {
                let occurrences: Vec<&Node> =
                    nodes.iter().filter(|candidate| candidate.name == node.name).collect();
                let min_rank = occurrences.iter().map(|candidate| candidate.rank).min();
                prop_assert_eq!(Some(node.rank), min_rank);
                prop_assert_eq!(
                    occurrences.last().map(|candidate| candidate.color.as_str()),
                    Some(node.color.as_str())
                );
                prop_assert_eq!(
                    merged.iter().filter(|other| other.name == node.name).count(),
                    1
                );
            }
        }
    }
}
