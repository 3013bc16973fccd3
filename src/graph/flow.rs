use super::{GraphEdge, GraphNode};
use crate::error::ValidationError;
use ahash::{AHashMap, AHashSet};

/// The recipe diagram: every step and every link between steps.
///
/// Nodes and edges keep their insertion order, which is what makes layout
/// output reproducible. During streaming the graph only grows; a complete
/// document replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node unless one with the same id already exists.
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.contains_node(&node.id) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Adds an edge unless one with the same id already exists.
    ///
    /// Endpoints are not checked here; see [`FlowGraph::validate`].
    pub fn insert_edge(&mut self, edge: GraphEdge) -> bool {
        if self.edges.iter().any(|e| e.id == edge.id) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn ingredients(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.is_ingredients())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks the graph invariants: unique ids, a single ingredients node,
    /// and every edge endpoint resolving to a node.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut node_ids: AHashSet<&str> = AHashSet::with_capacity(self.nodes.len());
        let mut ingredients: Option<&str> = None;
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(ValidationError::DuplicateNodeId(node.id.clone()));
            }
            if node.is_ingredients() {
                if let Some(first) = ingredients {
                    return Err(ValidationError::DuplicateIngredients {
                        first: first.to_string(),
                        second: node.id.clone(),
                    });
                }
                ingredients = Some(node.id.as_str());
            }
        }

        let mut edge_ids: AHashSet<&str> = AHashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(ValidationError::DuplicateEdgeId(edge.id.clone()));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(ValidationError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing_node_id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Index of node id to node, for lookups during a single pass.
    pub(crate) fn index_nodes(nodes: &[GraphNode]) -> AHashMap<&str, &GraphNode> {
        nodes.iter().map(|n| (n.id.as_str(), n)).collect()
    }
}
