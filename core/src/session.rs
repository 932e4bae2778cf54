use rand::Rng;
use serde::Serialize;

use crate::error::{MutationError, RunError};
use crate::graph::{Graph, NodeId, NodeKind};
use crate::input;
use crate::path::{edge_list, walk_predecessors};
use crate::shortest::{self, Algorithm};

/// A graph mutation request from the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOp {
    AddNode(NodeId),
    AddEdge {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },
    GenerateRandom {
        nodes: usize,
        probability: f64,
    },
    Clear,
}

/// Where the most recent run ended up. The intermediate phases are
/// observable only while `run` executes; afterwards the session sits in
/// `Idle` (never ran), `Done`, or `Failed` with the user-visible reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Validating,
    Computing,
    Done,
    Failed(String),
}

/// Immutable record of one completed run, produced fresh each time and
/// superseded by the next. An empty `path` means "no path found" — that
/// is a successful outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub algorithm: Algorithm,
    pub source: NodeId,
    pub destination: NodeId,
    pub path: Vec<NodeId>,
    /// Consecutive path pairs, for the renderer to color.
    pub highlighted_edges: Vec<(NodeId, NodeId)>,
}

impl RunResult {
    pub fn found_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Render the path the way the info panel shows it.
    pub fn describe(&self) -> String {
        if self.path.is_empty() {
            "No path found between the source and destination.".to_string()
        } else {
            self.path
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ")
        }
    }
}

/// Read-only view of the current graph for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub kind: NodeKind,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId, f64)>,
}

/// Owns the graph and orchestrates runs: validates inputs against the
/// current graph, dispatches to the selected algorithm, and keeps the
/// resulting path/highlight state for the rendering collaborator.
///
/// Single-threaded by design — a run borrows the graph read-only and
/// completes before control returns, so no mutation can overlap it.
pub struct Session {
    graph: Graph,
    state: RunState,
    last_run: Option<RunResult>,
}

impl Session {
    /// A session over an empty label-identified graph (the interactive
    /// default; random generation switches the graph to integer nodes).
    pub fn new() -> Self {
        Self::with_kind(NodeKind::Label)
    }

    pub fn with_kind(kind: NodeKind) -> Self {
        Self {
            graph: Graph::new(kind),
            state: RunState::Idle,
            last_run: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn last_run(&self) -> Option<&RunResult> {
        self.last_run.as_ref()
    }

    /// Edges of the most recent successful run; empty when there is none.
    pub fn highlighted_edges(&self) -> &[(NodeId, NodeId)] {
        self.last_run
            .as_ref()
            .map(|r| r.highlighted_edges.as_slice())
            .unwrap_or(&[])
    }

    /// Apply a mutation to the graph. Random generation draws from the
    /// thread RNG; use [`Session::mutate_with_rng`] for determinism.
    pub fn mutate(&mut self, op: MutationOp) -> Result<(), MutationError> {
        self.mutate_with_rng(op, &mut rand::thread_rng())
    }

    pub fn mutate_with_rng<R: Rng>(
        &mut self,
        op: MutationOp,
        rng: &mut R,
    ) -> Result<(), MutationError> {
        match op {
            MutationOp::AddNode(id) => self.graph.add_node(id),
            MutationOp::AddEdge { from, to, weight } => self.graph.add_edge(from, to, weight),
            MutationOp::GenerateRandom { nodes, probability } => {
                self.graph.generate_random(nodes, probability, rng)
            }
            MutationOp::Clear => {
                self.graph.clear();
                Ok(())
            }
        }
    }

    /// Add a node from its textual identifier.
    pub fn add_node_text(&mut self, text: &str) -> Result<(), MutationError> {
        let id = input::parse_node(self.graph.kind(), text)?;
        self.graph.add_node(id)
    }

    /// Add an edge from a `from,to,weight` spec.
    pub fn add_edge_text(&mut self, text: &str) -> Result<(), MutationError> {
        let op = input::parse_edge(self.graph.kind(), text)?;
        self.mutate(op)
    }

    /// Regenerate the graph from the two textual generation fields.
    pub fn generate_random_text(
        &mut self,
        nodes: &str,
        probability: &str,
    ) -> Result<(), MutationError> {
        let op = input::parse_random(nodes, probability)?;
        self.mutate(op)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            kind: self.graph.kind(),
            nodes: self.graph.nodes().cloned().collect(),
            edges: self
                .graph
                .edges()
                .map(|(from, to, w)| (from.clone(), to.clone(), w))
                .collect(),
        }
    }

    /// Execute one run with already-typed inputs.
    ///
    /// Highlight state from any previous run is discarded before
    /// validation, so a failed run never leaves stale highlights behind.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        source: NodeId,
        destination: NodeId,
    ) -> Result<&RunResult, RunError> {
        self.last_run = None;
        self.state = RunState::Validating;

        match self.execute(algorithm, source, destination) {
            Ok(result) => {
                tracing::info!(
                    algorithm = %result.algorithm,
                    source = %result.source,
                    destination = %result.destination,
                    found = result.found_path(),
                    "run complete"
                );
                self.state = RunState::Done;
                Ok(self.last_run.insert(result))
            }
            Err(err) => {
                tracing::warn!(algorithm = %algorithm, error = %err, "run failed");
                self.state = RunState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Execute one run from the UI's textual triple: algorithm name,
    /// source text, destination text. Node text is coerced to the graph's
    /// identifier kind, matching the validation order of [`Session::run`].
    pub fn run_text(
        &mut self,
        algorithm: &str,
        source: &str,
        destination: &str,
    ) -> Result<&RunResult, RunError> {
        self.last_run = None;
        self.state = RunState::Validating;

        match self.prepare_text(algorithm, source, destination) {
            Ok((algorithm, source, destination)) => self.run(algorithm, source, destination),
            Err(err) => {
                self.state = RunState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn prepare_text(
        &self,
        algorithm: &str,
        source: &str,
        destination: &str,
    ) -> Result<(Algorithm, NodeId, NodeId), RunError> {
        if self.graph.is_empty() {
            return Err(RunError::EmptyGraph);
        }
        let source = input::parse_run_node(self.graph.kind(), source)?;
        let destination = input::parse_run_node(self.graph.kind(), destination)?;
        let algorithm = input::parse_algorithm(algorithm)?;
        Ok((algorithm, source, destination))
    }

    fn validate(&self, source: &NodeId, destination: &NodeId) -> Result<(), RunError> {
        if self.graph.is_empty() {
            return Err(RunError::EmptyGraph);
        }
        for id in [source, destination] {
            if id.kind() != self.graph.kind() {
                return Err(RunError::TypeMismatch {
                    input: id.to_string(),
                    expected: self.graph.kind(),
                });
            }
            if !self.graph.contains(id) {
                return Err(RunError::NodeNotFound(id.clone()));
            }
        }
        Ok(())
    }

    fn execute(
        &mut self,
        algorithm: Algorithm,
        source: NodeId,
        destination: NodeId,
    ) -> Result<RunResult, RunError> {
        self.validate(&source, &destination)?;
        self.state = RunState::Computing;

        let path = match algorithm {
            Algorithm::BellmanFord => {
                let tree = shortest::bellman_ford(&self.graph, &source)?;
                walk_predecessors(&tree.pred, &source, &destination)
            }
            Algorithm::Dijkstra => {
                let tree = shortest::dijkstra(&self.graph, &source)?;
                walk_predecessors(&tree.pred, &source, &destination)
            }
            Algorithm::FloydWarshall => {
                shortest::floyd_warshall(&self.graph).path(&source, &destination)
            }
        };

        let highlighted_edges = edge_list(&path);
        Ok(RunResult {
            algorithm,
            source,
            destination,
            path,
            highlighted_edges,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
