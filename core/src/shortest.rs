use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::ComputeError;
use crate::graph::{Graph, NodeId};

/// Selectable shortest-path algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BellmanFord,
    FloydWarshall,
    Dijkstra,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::BellmanFord => write!(f, "bellman-ford"),
            Algorithm::FloydWarshall => write!(f, "floyd-warshall"),
            Algorithm::Dijkstra => write!(f, "dijkstra"),
        }
    }
}

/// Single-source result: shortest distance and predecessor per reached node.
///
/// Nodes absent from `dist` are unreachable from the source. The source
/// itself has distance 0 and no predecessor entry.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: NodeId,
    pub dist: HashMap<NodeId, f64>,
    pub pred: HashMap<NodeId, NodeId>,
}

impl ShortestPathTree {
    fn new(source: NodeId) -> Self {
        let mut dist = HashMap::new();
        dist.insert(source.clone(), 0.0);
        Self {
            source,
            dist,
            pred: HashMap::new(),
        }
    }

    pub fn distance(&self, node: &NodeId) -> Option<f64> {
        self.dist.get(node).copied()
    }
}

/// Bellman-Ford: single-source relaxation over all edges, |V|-1 rounds.
///
/// Handles negative edge weights. A final pass detects negative-weight
/// cycles reachable from the source and reports them as a distinct
/// failure — not a missing path. Rounds stop early once a full pass
/// relaxes nothing.
pub fn bellman_ford(graph: &Graph, source: &NodeId) -> Result<ShortestPathTree, ComputeError> {
    let mut tree = ShortestPathTree::new(source.clone());
    let edges: Vec<(&NodeId, &NodeId, f64)> = graph.edges().collect();

    for _ in 1..graph.node_count() {
        let mut changed = false;
        for &(from, to, weight) in &edges {
            if let Some(&d_from) = tree.dist.get(from) {
                let candidate = d_from + weight;
                if candidate < tree.dist.get(to).copied().unwrap_or(f64::INFINITY) {
                    tree.dist.insert(to.clone(), candidate);
                    tree.pred.insert(to.clone(), from.clone());
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    // One extra pass: any further relaxation means a reachable negative cycle.
    for &(from, to, weight) in &edges {
        if let Some(&d_from) = tree.dist.get(from) {
            if d_from + weight < tree.dist.get(to).copied().unwrap_or(f64::INFINITY) {
                return Err(ComputeError::NegativeCycle(source.clone()));
            }
        }
    }

    Ok(tree)
}

/// Heap entry ordered by distance, then node identifier. The identifier
/// tie-break keeps expansion order deterministic among equal distances.
#[derive(Debug, Clone, PartialEq)]
struct Frontier {
    dist: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra: single-source shortest path, min-distance-first expansion.
///
/// Requires nonnegative edge weights; the whole edge set is checked up
/// front and a violation is reported as `NegativeWeight` instead of
/// producing an undefined result. Stale heap entries are skipped on pop.
pub fn dijkstra(graph: &Graph, source: &NodeId) -> Result<ShortestPathTree, ComputeError> {
    for (from, to, weight) in graph.edges() {
        if weight < 0.0 {
            return Err(ComputeError::NegativeWeight {
                from: from.clone(),
                to: to.clone(),
                weight,
            });
        }
    }

    let mut tree = ShortestPathTree::new(source.clone());
    let mut heap: BinaryHeap<std::cmp::Reverse<Frontier>> = BinaryHeap::new();
    heap.push(std::cmp::Reverse(Frontier {
        dist: 0.0,
        node: source.clone(),
    }));

    while let Some(std::cmp::Reverse(Frontier { dist, node })) = heap.pop() {
        if dist > tree.dist.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }
        for (next, weight) in graph.neighbors(&node) {
            let candidate = dist + weight;
            if candidate < tree.dist.get(next).copied().unwrap_or(f64::INFINITY) {
                tree.dist.insert(next.clone(), candidate);
                tree.pred.insert(next.clone(), node.clone());
                heap.push(std::cmp::Reverse(Frontier {
                    dist: candidate,
                    node: next.clone(),
                }));
            }
        }
    }

    Ok(tree)
}

/// All-pairs result: distance and predecessor matrices over a sorted node
/// index. `pred[i][j]` is the node preceding `j` on a shortest `i -> j`
/// path; `None` for unreachable pairs and the diagonal.
#[derive(Debug, Clone)]
pub struct AllPairs {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    dist: Vec<f64>,
    pred: Vec<Option<usize>>,
}

impl AllPairs {
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.nodes.len() + j
    }

    /// Shortest distance from `from` to `to`. `None` when either node is
    /// missing or no path exists.
    pub fn distance(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        let i = *self.index.get(from)?;
        let j = *self.index.get(to)?;
        let d = self.dist[self.at(i, j)];
        d.is_finite().then_some(d)
    }

    /// Reconstruct the path from `from` to `to` by walking the predecessor
    /// matrix from the destination back toward the source. Empty when no
    /// path exists or either node is missing; `[from]` when the endpoints
    /// coincide. The walk is hop-bounded by the node count, so disconnected
    /// pairs (absent predecessor entries) cannot loop.
    pub fn path(&self, from: &NodeId, to: &NodeId) -> Vec<NodeId> {
        let (Some(&i), Some(&j)) = (self.index.get(from), self.index.get(to)) else {
            return Vec::new();
        };
        if i == j {
            return vec![from.clone()];
        }

        let mut reversed = vec![j];
        let mut current = j;
        for _ in 0..self.nodes.len() {
            match self.pred[self.at(i, current)] {
                Some(p) => {
                    reversed.push(p);
                    if p == i {
                        reversed.reverse();
                        return reversed.into_iter().map(|k| self.nodes[k].clone()).collect();
                    }
                    current = p;
                }
                None => return Vec::new(),
            }
        }
        Vec::new()
    }
}

/// Floyd-Warshall: all-pairs shortest paths via dynamic programming over
/// intermediate nodes. O(n³) — fine for the interactive sizes this
/// engine targets (low hundreds of nodes).
pub fn floyd_warshall(graph: &Graph) -> AllPairs {
    let nodes: Vec<NodeId> = graph.nodes().cloned().collect();
    let n = nodes.len();
    let index: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect();

    let mut dist = vec![f64::INFINITY; n * n];
    let mut pred: Vec<Option<usize>> = vec![None; n * n];

    for i in 0..n {
        dist[i * n + i] = 0.0;
    }
    for (from, to, weight) in graph.edges() {
        let (i, j) = (index[from], index[to]);
        if weight < dist[i * n + j] {
            dist[i * n + j] = weight;
            pred[i * n + j] = Some(i);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let d_ik = dist[i * n + k];
            if !d_ik.is_finite() {
                continue;
            }
            for j in 0..n {
                let candidate = d_ik + dist[k * n + j];
                if candidate < dist[i * n + j] {
                    dist[i * n + j] = candidate;
                    pred[i * n + j] = pred[k * n + j];
                }
            }
        }
    }

    AllPairs {
        nodes,
        index,
        dist,
        pred,
    }
}
