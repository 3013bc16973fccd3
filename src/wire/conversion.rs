use super::WireDocument;
use crate::error::RecipeConversionError;
use crate::graph::{FlowGraph, GraphEdge, GraphNode};

/// A trait for custom data models that can be converted into a `FlowGraph`.
///
/// The JSON document the model emits is one such format; implement this on
/// your own structs to lay out graphs that come from elsewhere (a saved
/// diagram, a hand-written recipe, a different model prompt).
///
/// # Example
///
/// ```rust,no_run
/// use mise::prelude::*;
/// use mise::error::RecipeConversionError;
///
/// struct Step { id: String, title: String, next: Option<String> }
/// struct Checklist { steps: Vec<Step> }
///
/// impl IntoFlow for Checklist {
///     fn into_flow(self) -> std::result::Result<FlowGraph, RecipeConversionError> {
///         let mut graph = FlowGraph::new();
///         for step in self.steps {
///             if let Some(next) = &step.next {
///                 graph.insert_edge(GraphEdge::new(
///                     format!("{}-{}", step.id, next),
///                     step.id.clone(),
///                     next.clone(),
///                 ));
///             }
///             graph.insert_node(GraphNode::new(step.id, NodeKind::Preparation, step.title));
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a `FlowGraph`.
    fn into_flow(self) -> Result<FlowGraph, RecipeConversionError>;
}

impl IntoFlow for WireDocument {
    /// Keeps every node and edge as-is, duplicates included, so that
    /// validation can report them.
    fn into_flow(self) -> Result<FlowGraph, RecipeConversionError> {
        Ok(FlowGraph {
            nodes: self.nodes.into_iter().map(GraphNode::from).collect(),
            edges: self.edges.into_iter().map(GraphEdge::from).collect(),
        })
    }
}
