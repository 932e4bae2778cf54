use std::collections::HashMap;

use crate::graph::NodeId;

/// Normalize a predecessor map into the ordered node sequence from
/// `source` to `destination`.
///
/// Contract: `destination == source` yields `[source]` (zero edges); a
/// destination the map never reaches yields an empty sequence. The walk
/// is hop-bounded by the map size, so a malformed map (a predecessor
/// cycle that never meets the source) also yields empty instead of
/// looping.
pub fn walk_predecessors(
    pred: &HashMap<NodeId, NodeId>,
    source: &NodeId,
    destination: &NodeId,
) -> Vec<NodeId> {
    if destination == source {
        return vec![source.clone()];
    }

    let mut reversed = vec![destination.clone()];
    let mut current = destination;
    for _ in 0..=pred.len() {
        match pred.get(current) {
            Some(parent) => {
                reversed.push(parent.clone());
                if parent == source {
                    reversed.reverse();
                    return reversed;
                }
                current = parent;
            }
            None => return Vec::new(),
        }
    }
    Vec::new()
}

/// Consecutive node pairs of a path — the edges a renderer highlights.
/// Empty for trivial and missing paths.
pub fn edge_list(path: &[NodeId]) -> Vec<(NodeId, NodeId)> {
    path.windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn preds(pairs: &[(&str, &str)]) -> HashMap<NodeId, NodeId> {
        pairs
            .iter()
            .map(|&(node, parent)| (label(node), label(parent)))
            .collect()
    }

    #[test]
    fn test_walk_chain() {
        let pred = preds(&[("b", "a"), ("c", "b"), ("d", "c")]);
        let path = walk_predecessors(&pred, &label("a"), &label("d"));
        assert_eq!(path, vec![label("a"), label("b"), label("c"), label("d")]);
        // length = hop count + 1
        assert_eq!(path.len(), pred.len() + 1);
    }

    #[test]
    fn test_walk_trivial() {
        let pred = preds(&[("b", "a")]);
        assert_eq!(
            walk_predecessors(&pred, &label("a"), &label("a")),
            vec![label("a")]
        );
    }

    #[test]
    fn test_walk_unreached_destination() {
        let pred = preds(&[("b", "a")]);
        assert!(walk_predecessors(&pred, &label("a"), &label("z")).is_empty());
    }

    #[test]
    fn test_walk_chain_not_rooted_at_source() {
        // d's chain bottoms out at x, never reaching a.
        let pred = preds(&[("d", "c"), ("c", "x")]);
        assert!(walk_predecessors(&pred, &label("a"), &label("d")).is_empty());
    }

    #[test]
    fn test_walk_cyclic_map_terminates() {
        let pred = preds(&[("b", "c"), ("c", "b")]);
        assert!(walk_predecessors(&pred, &label("a"), &label("b")).is_empty());
    }

    #[test]
    fn test_edge_list() {
        let path = vec![label("a"), label("b"), label("c")];
        assert_eq!(
            edge_list(&path),
            vec![(label("a"), label("b")), (label("b"), label("c"))]
        );
    }

    #[test]
    fn test_edge_list_trivial_and_empty() {
        assert!(edge_list(&[label("a")]).is_empty());
        assert!(edge_list(&[]).is_empty());
    }
}
