//! The accumulate-and-relayout loop around a single model stream.
//!
//! A [`FlowSession`] owns one [`ParseCursor`] and the working graph built from
//! it. Feed it fragments as they arrive; after each one the graph holds every
//! node and edge recovered so far, already laid out. When the stream ends,
//! [`FlowSession::complete`] swaps in the validated final document.

use crate::error::{DocumentError, ExtractError};
use crate::extract::ParseCursor;
use crate::graph::{FlowGraph, GraphEdge};
use crate::layout::LayoutEngine;
use crate::wire::parse_document;
use itertools::Itertools;
use tracing::{debug, warn};

/// What changed in the working graph after one fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub added_nodes: Vec<String>,
    pub added_edges: Vec<String>,
    /// Nodes discarded because they broke a graph invariant.
    pub dropped_nodes: Vec<String>,
}

impl SessionUpdate {
    /// Whether the working graph changed.
    pub fn changed(&self) -> bool {
        !self.added_nodes.is_empty() || !self.added_edges.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Streaming,
    /// The final document was accepted and replaced the working graph.
    Completed,
    /// The stream errored or its final document was rejected.
    Failed,
}

pub struct FlowSession {
    engine: LayoutEngine,
    cursor: ParseCursor,
    graph: FlowGraph,
    /// Edges whose endpoints have not both arrived yet.
    pending_edges: Vec<GraphEdge>,
    state: SessionState,
}

impl FlowSession {
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            cursor: ParseCursor::new(),
            graph: FlowGraph::new(),
            pending_edges: Vec::new(),
            state: SessionState::Streaming,
        }
    }

    /// Consumes one fragment, grows the working graph and lays it out again.
    pub fn feed(&mut self, fragment: &str) -> Result<SessionUpdate, ExtractError> {
        let extracted = self.cursor.feed(fragment)?;
        let mut update = SessionUpdate::default();
        if extracted.is_empty() {
            return Ok(update);
        }

        for node in extracted.nodes {
            if node.is_ingredients() {
                if let Some(existing) = self.graph.ingredients() {
                    warn!(
                        existing = %existing.id,
                        dropped = %node.id,
                        "second ingredients node in stream, dropping it"
                    );
                    update.dropped_nodes.push(node.id);
                    continue;
                }
            }
            let id = node.id.clone();
            if self.graph.insert_node(node) {
                update.added_nodes.push(id);
            }
        }

        self.pending_edges.extend(extracted.edges);
        self.promote_pending_edges(&mut update);

        if update.changed() {
            self.engine.apply(&mut self.graph);
            debug!(
                nodes = %update.added_nodes.iter().join(","),
                edges = %update.added_edges.iter().join(","),
                pending = self.pending_edges.len(),
                "working graph updated"
            );
        }
        Ok(update)
    }

    /// Replaces the working graph with the validated final document.
    ///
    /// On failure the error is returned and the last incremental graph is
    /// left as it was. The cursor is closed either way.
    pub fn complete(&mut self, final_json: &str) -> Result<&FlowGraph, DocumentError> {
        self.cursor.close();
        match parse_document(final_json) {
            Ok(mut graph) => {
                self.engine.apply(&mut graph);
                self.graph = graph;
                self.pending_edges.clear();
                self.state = SessionState::Completed;
                debug!(
                    nodes = self.graph.nodes.len(),
                    edges = self.graph.edges.len(),
                    "final document accepted"
                );
                Ok(&self.graph)
            }
            Err(e) => {
                warn!(error = %e, "final document rejected, keeping incremental graph");
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    /// Completes the session using everything streamed so far as the final document.
    pub fn complete_from_buffer(&mut self) -> Result<&FlowGraph, DocumentError> {
        let buffer = self.cursor.buffer().to_string();
        self.complete(&buffer)
    }

    /// The stream ended with an error. Keeps the working graph as it is.
    pub fn fail(&mut self) {
        self.cursor.close();
        self.state = SessionState::Failed;
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FlowGraph {
        self.graph
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != SessionState::Streaming
    }

    pub fn pending_edge_count(&self) -> usize {
        self.pending_edges.len()
    }

    fn promote_pending_edges(&mut self, update: &mut SessionUpdate) {
        let (ready, waiting): (Vec<GraphEdge>, Vec<GraphEdge>) =
            std::mem::take(&mut self.pending_edges)
                .into_iter()
                .partition(|e| {
                    self.graph.contains_node(&e.source) && self.graph.contains_node(&e.target)
                });
        self.pending_edges = waiting;
        for edge in ready {
            let id = edge.id.clone();
            if self.graph.insert_edge(edge) {
                update.added_edges.push(id);
            }
        }
    }
}
