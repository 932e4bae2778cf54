use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::error::MutationError;

/// Weight assigned to edges created without an explicit weight
/// (random generation produces unweighted edges).
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Which identifier family a graph's nodes use. A graph is homogeneous:
/// mixing integer and label nodes in one instance is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Integer,
    Label,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Integer => write!(f, "integer"),
            NodeKind::Label => write!(f, "label"),
        }
    }
}

/// A node identifier. Identity is value equality; ordering gives every
/// traversal a deterministic neighbor scan (smallest identifier first),
/// which is the documented tie-break among equal-weight paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    Integer(i64),
    Label(String),
}

impl NodeId {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeId::Integer(_) => NodeKind::Integer,
            NodeId::Label(_) => NodeKind::Label,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Integer(n) => write!(f, "{}", n),
            NodeId::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Integer(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Label(s.to_string())
    }
}

/// Directed, edge-weighted graph: node set + adjacency maps.
///
/// Every node owns an entry in `outgoing`, possibly empty, so the key set
/// *is* the node set. There is at most one edge per ordered pair — adding
/// an existing edge overwrites its weight. Self-loops are permitted.
/// BTreeMap keeps node and neighbor iteration in ascending identifier
/// order, making algorithm results deterministic.
pub struct Graph {
    kind: NodeKind,
    outgoing: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
    edge_count: usize,
}

impl Graph {
    /// Create an empty graph whose nodes will use the given identifier kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            outgoing: BTreeMap::new(),
            edge_count: 0,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    fn check_kind(&self, id: &NodeId) -> Result<(), MutationError> {
        if id.kind() != self.kind {
            return Err(MutationError::TypeMismatch {
                input: id.to_string(),
                expected: self.kind,
            });
        }
        Ok(())
    }

    fn check_identifier(id: &NodeId) -> Result<(), MutationError> {
        if let NodeId::Label(label) = id {
            if label.trim().is_empty() {
                return Err(MutationError::EmptyIdentifier);
            }
        }
        Ok(())
    }

    /// Insert a node. Idempotent if already present.
    pub fn add_node(&mut self, id: NodeId) -> Result<(), MutationError> {
        Self::check_identifier(&id)?;
        self.check_kind(&id)?;
        self.outgoing.entry(id).or_default();
        Ok(())
    }

    /// Add a directed edge, creating missing endpoints implicitly.
    /// An existing edge between the same ordered pair has its weight
    /// overwritten.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<(), MutationError> {
        Self::check_identifier(&from)?;
        Self::check_identifier(&to)?;
        self.check_kind(&from)?;
        self.check_kind(&to)?;
        if !weight.is_finite() {
            return Err(MutationError::InvalidWeight(weight.to_string()));
        }

        self.outgoing.entry(to.clone()).or_default();
        let previous = self.outgoing.entry(from).or_default().insert(to, weight);
        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Replace the entire graph with a directed Erdős–Rényi instance:
    /// nodes `0..node_count`, and for every ordered pair of distinct nodes
    /// an independent Bernoulli trial with `edge_probability`. Generated
    /// edges carry [`DEFAULT_WEIGHT`]. The node kind becomes `Integer`.
    pub fn generate_random<R: Rng>(
        &mut self,
        node_count: usize,
        edge_probability: f64,
        rng: &mut R,
    ) -> Result<(), MutationError> {
        if node_count == 0 {
            return Err(MutationError::InvalidParameter(
                "node count must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&edge_probability) {
            return Err(MutationError::InvalidParameter(format!(
                "edge probability must be within [0, 1], got {}",
                edge_probability
            )));
        }

        self.kind = NodeKind::Integer;
        self.outgoing.clear();
        self.edge_count = 0;

        for i in 0..node_count {
            self.outgoing
                .insert(NodeId::Integer(i as i64), BTreeMap::new());
        }
        for i in 0..node_count {
            for j in 0..node_count {
                if i != j && rng.gen_bool(edge_probability) {
                    if let Some(adj) = self.outgoing.get_mut(&NodeId::Integer(i as i64)) {
                        adj.insert(NodeId::Integer(j as i64), DEFAULT_WEIGHT);
                        self.edge_count += 1;
                    }
                }
            }
        }

        tracing::debug!(
            nodes = self.node_count(),
            edges = self.edge_count,
            probability = edge_probability,
            "generated random graph"
        );
        Ok(())
    }

    /// Remove all nodes and edges. The identifier kind is unchanged.
    pub fn clear(&mut self) {
        self.outgoing.clear();
        self.edge_count = 0;
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.outgoing.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes in ascending identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.outgoing.keys()
    }

    /// Outgoing neighbors of a node with edge weights, ascending by target.
    pub fn neighbors(&self, id: &NodeId) -> impl Iterator<Item = (&NodeId, f64)> {
        self.outgoing
            .get(id)
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(to, &w)| (to, w)))
    }

    /// All edges as `(from, to, weight)`, ascending by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, f64)> {
        self.outgoing
            .iter()
            .flat_map(|(from, adj)| adj.iter().map(move |(to, &w)| (from, to, w)))
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        self.outgoing.get(from).and_then(|adj| adj.get(to)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn label(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_add_node_idempotent() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_node(label("a")).unwrap();
        g.add_node(label("a")).unwrap();
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("b"), 2.5).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains(&label("a")));
        assert!(g.contains(&label("b")));
    }

    #[test]
    fn test_edge_weight_round_trip() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("b"), 3.25).unwrap();
        assert_eq!(g.weight(&label("a"), &label("b")), Some(3.25));
    }

    #[test]
    fn test_edges_are_directed() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("b"), 1.0).unwrap();
        assert_eq!(g.weight(&label("a"), &label("b")), Some(1.0));
        assert_eq!(g.weight(&label("b"), &label("a")), None);
    }

    #[test]
    fn test_duplicate_edge_overwrites_weight() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("b"), 1.0).unwrap();
        g.add_edge(label("a"), label("b"), 9.0).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight(&label("a"), &label("b")), Some(9.0));
    }

    #[test]
    fn test_self_loop_permitted() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("a"), 1.0).unwrap();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut g = Graph::new(NodeKind::Label);
        let err = g
            .add_edge(label("a"), label("b"), f64::INFINITY)
            .unwrap_err();
        assert!(matches!(err, MutationError::InvalidWeight(_)));
        let err = g.add_edge(label("a"), label("b"), f64::NAN).unwrap_err();
        assert!(matches!(err, MutationError::InvalidWeight(_)));
        assert!(g.is_empty());
    }

    #[test]
    fn test_mixed_kinds_rejected() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_node(label("a")).unwrap();
        let err = g.add_node(NodeId::Integer(1)).unwrap_err();
        assert!(matches!(err, MutationError::TypeMismatch { .. }));

        let mut g = Graph::new(NodeKind::Integer);
        let err = g.add_edge(NodeId::Integer(0), label("b"), 1.0).unwrap_err();
        assert!(matches!(err, MutationError::TypeMismatch { .. }));
        assert!(g.is_empty());
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let mut g = Graph::new(NodeKind::Label);
        assert!(matches!(
            g.add_node(label("   ")),
            Err(MutationError::EmptyIdentifier)
        ));
        assert!(matches!(
            g.add_node(label("")),
            Err(MutationError::EmptyIdentifier)
        ));
        assert!(matches!(
            g.add_edge(label("a"), label(" "), 1.0),
            Err(MutationError::EmptyIdentifier)
        ));
        assert!(g.is_empty());
    }

    #[test]
    fn test_generate_random_p_zero() {
        let mut g = Graph::new(NodeKind::Label);
        let mut rng = StdRng::seed_from_u64(7);
        g.generate_random(10, 0.0, &mut rng).unwrap();
        assert_eq!(g.kind(), NodeKind::Integer);
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_generate_random_p_one() {
        let mut g = Graph::new(NodeKind::Integer);
        let mut rng = StdRng::seed_from_u64(7);
        g.generate_random(10, 1.0, &mut rng).unwrap();
        assert_eq!(g.node_count(), 10);
        // Every ordered distinct pair: n * (n - 1)
        assert_eq!(g.edge_count(), 90);
        // No self-loops from generation
        for i in 0..10 {
            assert_eq!(g.weight(&NodeId::Integer(i), &NodeId::Integer(i)), None);
        }
    }

    #[test]
    fn test_generate_random_default_weight() {
        let mut g = Graph::new(NodeKind::Integer);
        let mut rng = StdRng::seed_from_u64(7);
        g.generate_random(5, 1.0, &mut rng).unwrap();
        for (_, _, w) in g.edges() {
            assert_eq!(w, DEFAULT_WEIGHT);
        }
    }

    #[test]
    fn test_generate_random_replaces_contents() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("b"), 4.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        g.generate_random(3, 0.0, &mut rng).unwrap();
        assert!(!g.contains(&label("a")));
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn test_generate_random_rejects_bad_params() {
        let mut g = Graph::new(NodeKind::Integer);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            g.generate_random(0, 0.5, &mut rng),
            Err(MutationError::InvalidParameter(_))
        ));
        assert!(matches!(
            g.generate_random(5, 1.5, &mut rng),
            Err(MutationError::InvalidParameter(_))
        ));
        assert!(matches!(
            g.generate_random(5, -0.1, &mut rng),
            Err(MutationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_edge(label("a"), label("b"), 1.0).unwrap();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.kind(), NodeKind::Label);
    }

    #[test]
    fn test_nodes_sorted() {
        let mut g = Graph::new(NodeKind::Label);
        g.add_node(label("c")).unwrap();
        g.add_node(label("a")).unwrap();
        g.add_node(label("b")).unwrap();
        let names: Vec<String> = g.nodes().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
