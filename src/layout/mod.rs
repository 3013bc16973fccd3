//! Deterministic 2-D layout of recipe step-graphs.
//!
//! A recipe graph usually has one ingredients root feeding several parallel
//! blocks that converge on a merge step, followed by a short tail of serving
//! steps. [`LayoutEngine`] recognises that shape and places it as:
//!
//! ```text
//!                 [B1] -> [P1] ->
//! [Ingredients]                     [Merge]
//!                 [B2] -> [P2] ->
//!                                   [Tail 1]  (packed right-to-left below)
//! ```
//!
//! Graphs without that shape (for instance, early in a stream before the root
//! has arrived) fall back to boustrophedon row packing. Every call is a pure
//! function of its inputs.

mod fallback;
mod handles;
mod placement;
mod topology;

pub use handles::HandleAllocation;
pub use topology::{Adjacency, BlockChain, Topology};

use crate::graph::{FlowGraph, GraphEdge, GraphNode, Position};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Geometry used by the layout engine. All distances are in diagram units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Distance between the left edges of horizontally adjacent nodes.
    pub horizontal_pitch: f64,
    /// Distance between the top edges of vertically adjacent rows.
    pub vertical_pitch: f64,
    pub margin: f64,
    /// Canvas width assumed when the viewport width is unknown.
    pub fallback_width: f64,
    /// Cap on any walk through the graph; protects against cycles.
    pub max_depth: usize,
    pub viewport_width: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 80.0,
            horizontal_pitch: 250.0,
            vertical_pitch: 150.0,
            margin: 50.0,
            fallback_width: 1200.0,
            max_depth: 64,
            viewport_width: None,
        }
    }
}

impl LayoutConfig {
    /// The usable canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.viewport_width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(self.fallback_width)
    }

    /// How many nodes fit across `width` at the horizontal pitch (at least one).
    pub(crate) fn nodes_per_row(&self, width: f64) -> usize {
        let pitch = self.horizontal_pitch.max(1.0);
        let fit = (width / pitch).floor();
        if fit.is_finite() && fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }
}

/// Which placement algorithm a layout pass used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Ingredients root with parallel block rows.
    Blocks,
    /// No recognisable root; nodes were packed into rows.
    RowPacking,
}

/// Computes node positions and edge handles.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

pub struct LayoutEngineBuilder {
    config: LayoutConfig,
}

impl LayoutEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }
    pub fn viewport_width(mut self, width: f64) -> Self {
        self.config.viewport_width = Some(width);
        self
    }
    pub fn horizontal_pitch(mut self, pitch: f64) -> Self {
        self.config.horizontal_pitch = pitch;
        self
    }
    pub fn vertical_pitch(mut self, pitch: f64) -> Self {
        self.config.vertical_pitch = pitch;
        self
    }
    pub fn margin(mut self, margin: f64) -> Self {
        self.config.margin = margin;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }
    pub fn build(self) -> LayoutEngine {
        LayoutEngine {
            config: self.config,
        }
    }
}

impl Default for LayoutEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> LayoutEngineBuilder {
        LayoutEngineBuilder::new()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Returns a copy of `nodes` with every `position` filled in.
    pub fn layout(&self, nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<GraphNode> {
        let (strategy, positions) = self.compute_positions(nodes, edges);
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            ?strategy,
            "computed layout"
        );
        nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                node.position = Some(positions.get(node.id.as_str()).copied().unwrap_or(
                    Position::new(self.config.margin, self.config.margin),
                ));
                node
            })
            .collect()
    }

    /// Returns a copy of `edges` with source and target handles assigned.
    ///
    /// Uses the positions already on `nodes`; run [`LayoutEngine::layout`] first.
    pub fn assign_handles(&self, nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<GraphEdge> {
        handles::assign(nodes, edges, &self.config)
    }

    /// Lays out `graph` in place: positions first, then handles.
    pub fn apply(&self, graph: &mut FlowGraph) {
        graph.nodes = self.layout(&graph.nodes, &graph.edges);
        graph.edges = self.assign_handles(&graph.nodes, &graph.edges);
    }

    /// The strategy a layout of this graph would use.
    pub fn strategy(&self, nodes: &[GraphNode], edges: &[GraphEdge]) -> LayoutStrategy {
        let adjacency = Adjacency::new(nodes, edges);
        match Topology::detect(nodes, &adjacency, self.config.max_depth) {
            Some(_) => LayoutStrategy::Blocks,
            None => LayoutStrategy::RowPacking,
        }
    }

    fn compute_positions<'a>(
        &self,
        nodes: &'a [GraphNode],
        edges: &'a [GraphEdge],
    ) -> (LayoutStrategy, AHashMap<&'a str, Position>) {
        if nodes.is_empty() {
            return (LayoutStrategy::RowPacking, AHashMap::new());
        }
        let adjacency = Adjacency::new(nodes, edges);
        match Topology::detect(nodes, &adjacency, self.config.max_depth) {
            Some(topology) => (
                LayoutStrategy::Blocks,
                placement::place(nodes, &adjacency, &topology, &self.config),
            ),
            None => (
                LayoutStrategy::RowPacking,
                fallback::pack_rows(nodes, &adjacency, &self.config),
            ),
        }
    }
}

/// Lays out `nodes` with the default geometry.
pub fn layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    viewport_width: Option<f64>,
) -> Vec<GraphNode> {
    let config = LayoutConfig {
        viewport_width,
        ..LayoutConfig::default()
    };
    LayoutEngine::new(config).layout(nodes, edges)
}

/// Assigns edge handles with the default geometry.
pub fn assign_handles(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<GraphEdge> {
    LayoutEngine::default().assign_handles(nodes, edges)
}
