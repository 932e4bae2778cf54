//! Textual input contracts from the UI layer.
//!
//! The core does not own any widgets, but it owns the formats they
//! submit: node identifiers, `from,to,weight` edge specs, algorithm
//! names, and the two random-generation fields. Fields are trimmed
//! before parsing; blank identifiers are rejected.

use crate::error::{MutationError, RunError};
use crate::graph::{NodeId, NodeKind};
use crate::session::MutationOp;
use crate::shortest::Algorithm;

/// Parse an algorithm name, case-insensitive.
pub fn parse_algorithm(text: &str) -> Result<Algorithm, RunError> {
    match text.trim().to_lowercase().as_str() {
        "bellman-ford" | "bellman ford" | "bellmanford" => Ok(Algorithm::BellmanFord),
        "floyd-warshall" | "floyd warshall" | "floydwarshall" => Ok(Algorithm::FloydWarshall),
        "dijkstra" => Ok(Algorithm::Dijkstra),
        other => Err(RunError::UnknownAlgorithm(other.to_string())),
    }
}

/// Parse a node identifier for a mutation, according to the graph's kind.
/// Integer graphs require the text to parse as an integer.
pub fn parse_node(kind: NodeKind, text: &str) -> Result<NodeId, MutationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MutationError::EmptyIdentifier);
    }
    match kind {
        NodeKind::Integer => text.parse::<i64>().map(NodeId::Integer).map_err(|_| {
            MutationError::TypeMismatch {
                input: text.to_string(),
                expected: kind,
            }
        }),
        NodeKind::Label => Ok(NodeId::Label(text.to_string())),
    }
}

/// Parse a node identifier for a run request. Unlike mutations, a blank
/// label is not special here — it simply names a node that cannot exist,
/// and fails downstream as `NodeNotFound`.
pub fn parse_run_node(kind: NodeKind, text: &str) -> Result<NodeId, RunError> {
    let text = text.trim();
    match kind {
        NodeKind::Integer => {
            text.parse::<i64>()
                .map(NodeId::Integer)
                .map_err(|_| RunError::TypeMismatch {
                    input: text.to_string(),
                    expected: kind,
                })
        }
        NodeKind::Label => Ok(NodeId::Label(text.to_string())),
    }
}

/// Parse a `from,to,weight` edge spec into an add-edge mutation.
/// Exactly three comma-separated fields; whitespace around each field is
/// tolerated.
pub fn parse_edge(kind: NodeKind, text: &str) -> Result<MutationOp, MutationError> {
    let fields: Vec<&str> = text.split(',').collect();
    let [from, to, weight] = fields.as_slice() else {
        return Err(MutationError::MalformedEdge(text.trim().to_string()));
    };

    let from = parse_node(kind, from)?;
    let to = parse_node(kind, to)?;
    let weight_text = weight.trim();
    let weight: f64 = weight_text
        .parse()
        .map_err(|_| MutationError::InvalidWeight(weight_text.to_string()))?;
    if !weight.is_finite() {
        return Err(MutationError::InvalidWeight(weight_text.to_string()));
    }

    Ok(MutationOp::AddEdge { from, to, weight })
}

/// Parse the two random-generation fields: an integer node count and an
/// edge probability. Range checks happen in the graph store.
pub fn parse_random(nodes: &str, probability: &str) -> Result<MutationOp, MutationError> {
    let nodes_text = nodes.trim();
    let nodes: usize = nodes_text.parse().map_err(|_| {
        MutationError::InvalidParameter(format!(
            "node count `{}` is not a nonnegative integer",
            nodes_text
        ))
    })?;
    let prob_text = probability.trim();
    let probability: f64 = prob_text.parse().map_err(|_| {
        MutationError::InvalidParameter(format!("edge probability `{}` is not a number", prob_text))
    })?;

    Ok(MutationOp::GenerateRandom { nodes, probability })
}
