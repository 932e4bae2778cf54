use thiserror::Error;

use crate::graph::{NodeId, NodeKind};

/// Rejection of a graph mutation request. All variants are user-correctable;
/// the graph is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("node identifier must not be empty")]
    EmptyIdentifier,

    #[error("edge input must be `from,to,weight`, got `{0}`")]
    MalformedEdge(String),

    #[error("edge weight `{0}` is not a finite number")]
    InvalidWeight(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("identifier `{input}` does not match the graph's {expected} nodes")]
    TypeMismatch { input: String, expected: NodeKind },
}

/// Failure inside an algorithm run. Fatal to that run, not to the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    #[error("negative-weight cycle reachable from `{0}`")]
    NegativeCycle(NodeId),

    #[error("edge `{from}` -> `{to}` has negative weight {weight}; Dijkstra requires nonnegative weights")]
    NegativeWeight { from: NodeId, to: NodeId, weight: f64 },
}

/// Rejection of a `run` request. Caught at the session boundary and turned
/// into a terminal `Failed` state with the formatted message; an unreachable
/// destination is *not* one of these — that is a successful run with an
/// empty path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error("the graph is empty; add nodes or generate a graph first")]
    EmptyGraph,

    #[error("node `{0}` does not exist in the graph")]
    NodeNotFound(NodeId),

    #[error("`{input}` does not match the graph's {expected} node identifiers")]
    TypeMismatch { input: String, expected: NodeKind },

    #[error("unknown algorithm `{0}`; expected bellman-ford, floyd-warshall, or dijkstra")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Compute(#[from] ComputeError),
}
