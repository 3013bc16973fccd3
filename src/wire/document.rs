use super::{IntoFlow, WireDocument};
use crate::error::DocumentError;
use crate::graph::{FlowGraph, Ingredient, Position, Side};
use serde::Serialize;

/// Parses and validates a complete flow document.
///
/// This is the authoritative path taken once a stream has finished. Unlike
/// incremental extraction, any structural problem is reported.
pub fn parse_document(json: &str) -> Result<FlowGraph, DocumentError> {
    let document: WireDocument = serde_json::from_str(strip_code_fence(json))
        .map_err(|e| DocumentError::JsonParseError(e.to_string()))?;
    let graph = document.into_flow()?;
    graph.validate()?;
    Ok(graph)
}

/// Removes a surrounding markdown code fence (```` ```json ... ``` ````), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") up to the end of the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Serialize)]
struct OutputDocument<'a> {
    nodes: Vec<OutputNode<'a>>,
    edges: Vec<OutputEdge<'a>>,
}

#[derive(Serialize)]
struct OutputNode<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    node_type: String,
    position: Position,
    data: OutputNodeData<'a>,
}

#[derive(Serialize)]
struct OutputNodeData<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "no_ingredients")]
    ingredients: &'a [Ingredient],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputEdge<'a> {
    id: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_handle: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_handle: Option<Side>,
}

fn no_ingredients(ingredients: &&[Ingredient]) -> bool {
    ingredients.is_empty()
}

/// Renders a graph back into the document shape, including computed
/// positions and handles. Unpositioned nodes are written at the origin.
pub fn to_document(graph: &FlowGraph) -> serde_json::Value {
    let document = OutputDocument {
        nodes: graph
            .nodes
            .iter()
            .map(|n| OutputNode {
                id: &n.id,
                node_type: n.kind.to_string(),
                position: n.position.unwrap_or_default(),
                data: OutputNodeData {
                    label: &n.label,
                    description: n.description.as_deref(),
                    ingredients: &n.ingredients,
                },
            })
            .collect(),
        edges: graph
            .edges
            .iter()
            .map(|e| OutputEdge {
                id: &e.id,
                source: &e.source,
                target: &e.target,
                time: e.wait_time.as_deref(),
                label: e.label.as_deref(),
                source_handle: e.source_handle,
                target_handle: e.target_handle,
            })
            .collect(),
    };
    // Serializing plain structs of strings and finite floats cannot fail.
    serde_json::to_value(document).unwrap_or(serde_json::Value::Null)
}
