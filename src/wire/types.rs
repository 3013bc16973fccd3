use crate::graph::{GraphEdge, GraphNode, Ingredient, NodeKind};
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// The closed set of node `type` tags a producer may emit.
///
/// Anything outside this set fails to decode, so loosely shaped objects never
/// reach the graph.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WireNodeType {
    #[serde(rename = "ingredientNode")]
    Ingredient,
    #[serde(rename = "preparationNode")]
    Preparation,
    #[serde(rename = "cookingNode")]
    Cooking,
    #[serde(rename = "servingNode")]
    Serving,
    #[serde(rename = "blockNode")]
    Block,
}

impl From<WireNodeType> for NodeKind {
    fn from(value: WireNodeType) -> Self {
        match value {
            WireNodeType::Ingredient => NodeKind::Ingredients,
            WireNodeType::Preparation => NodeKind::Preparation,
            WireNodeType::Cooking => NodeKind::Cooking,
            WireNodeType::Serving => NodeKind::Serving,
            WireNodeType::Block => NodeKind::Block,
        }
    }
}

/// Ingredient line as emitted by the model; quantities sometimes arrive as bare numbers.
#[derive(Debug, Deserialize, Clone)]
pub struct WireIngredient {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub quantity: String,
}

/// Display payload of a node.
#[derive(Debug, Deserialize, Clone)]
pub struct WireNodeData {
    #[serde(default)]
    pub label: String,
    pub description: Option<String>,
    pub ingredients: Option<Vec<WireIngredient>>,
}

/// A node object. Producer-supplied `position` is ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct WireNode {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub node_type: WireNodeType,
    pub data: WireNodeData,
}

/// An edge object.
#[derive(Debug, Deserialize, Clone)]
pub struct WireEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(alias = "waitTime")]
    pub time: Option<String>,
    pub label: Option<String>,
}

/// The complete document.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WireDocument {
    #[serde(default)]
    pub nodes: Vec<WireNode>,
    #[serde(default)]
    pub edges: Vec<WireEdge>,
}

impl From<WireNode> for GraphNode {
    fn from(wire: WireNode) -> Self {
        let kind = NodeKind::from(wire.node_type);
        let ingredients = wire
            .data
            .ingredients
            .unwrap_or_default()
            .into_iter()
            .map(|i| Ingredient::new(i.name, i.quantity))
            .collect();
        let node = GraphNode::new(wire.id, kind, wire.data.label).with_ingredients(ingredients);
        match wire.data.description {
            Some(description) => node.with_description(description),
            None => node,
        }
    }
}

impl From<WireEdge> for GraphEdge {
    fn from(wire: WireEdge) -> Self {
        GraphEdge {
            id: wire.id,
            source: wire.source,
            target: wire.target,
            wait_time: wire.time,
            label: wire.label,
            source_handle: None,
            target_handle: None,
        }
    }
}

/// Decodes one candidate node object.
pub fn decode_node(raw: &str) -> Result<GraphNode, serde_json::Error> {
    serde_json::from_str::<WireNode>(raw).map(GraphNode::from)
}

/// Decodes one candidate edge object.
pub fn decode_edge(raw: &str) -> Result<GraphEdge, serde_json::Error> {
    serde_json::from_str::<WireEdge>(raw).map(GraphEdge::from)
}

pub fn decode_node_value(value: &serde_json::Value) -> Result<GraphNode, serde_json::Error> {
    WireNode::deserialize(value).map(GraphNode::from)
}

pub fn decode_edge_value(value: &serde_json::Value) -> Result<GraphEdge, serde_json::Error> {
    WireEdge::deserialize(value).map(GraphEdge::from)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number for quantity, found {}",
            other
        ))),
    }
}
