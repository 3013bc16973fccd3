//! Common test utilities for building flow documents and graphs.
use mise::prelude::*;

/// The canonical two-block recipe.
///
/// `I -> B1 -> P1 -> M`, `I -> B2 -> P2 -> M`, `M -> S`. The block 1 description
/// carries braces, brackets and escaped quotes to exercise the scanner.
#[allow(dead_code)]
pub const SCENARIO_JSON: &str = r#"{
  "nodes": [
    {"id": "I", "type": "ingredientNode", "position": {"x": 0, "y": 0}, "data": {"label": "Ingredients", "ingredients": [{"name": "flour", "quantity": "500 g"}, {"name": "eggs", "quantity": 3}]}},
    {"id": "B1", "type": "blockNode", "position": {"x": 0, "y": 0}, "data": {"label": "Dough", "description": "Mix {flour} and \"eggs\" [well] \\ then rest"}},
    {"id": "P1", "type": "preparationNode", "position": {"x": 0, "y": 0}, "data": {"label": "Knead"}},
    {"id": "B2", "type": "blockNode", "position": {"x": 0, "y": 0}, "data": {"label": "Filling"}},
    {"id": "P2", "type": "cookingNode", "position": {"x": 0, "y": 0}, "data": {"label": "Saute"}},
    {"id": "M", "type": "cookingNode", "position": {"x": 0, "y": 0}, "data": {"label": "Assemble and bake"}},
    {"id": "S", "type": "servingNode", "position": {"x": 0, "y": 0}, "data": {"label": "Serve"}}
  ],
  "edges": [
    {"id": "e1", "source": "I", "target": "B1"},
    {"id": "e2", "source": "I", "target": "B2"},
    {"id": "e3", "source": "B1", "target": "P1", "time": "30 min"},
    {"id": "e4", "source": "B2", "target": "P2"},
    {"id": "e5", "source": "P1", "target": "M"},
    {"id": "e6", "source": "P2", "target": "M"},
    {"id": "e7", "source": "M", "target": "S", "label": "plate"}
  ]
}"#;

#[allow(dead_code)]
pub const SCENARIO_NODE_IDS: [&str; 7] = ["I", "B1", "P1", "B2", "P2", "M", "S"];

#[allow(dead_code)]
pub const SCENARIO_EDGE_IDS: [&str; 7] = ["e1", "e2", "e3", "e4", "e5", "e6", "e7"];

#[allow(dead_code)]
pub fn node(id: &str, kind: NodeKind) -> GraphNode {
    GraphNode::new(id, kind, id)
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> GraphEdge {
    GraphEdge::new(format!("{}-{}", source, target), source, target)
}

/// The scenario graph built in code rather than parsed.
#[allow(dead_code)]
pub fn scenario_graph() -> FlowGraph {
    FlowGraph {
        nodes: vec![
            node("I", NodeKind::Ingredients),
            node("B1", NodeKind::Block),
            node("P1", NodeKind::Preparation),
            node("B2", NodeKind::Block),
            node("P2", NodeKind::Cooking),
            node("M", NodeKind::Cooking),
            node("S", NodeKind::Serving),
        ],
        edges: vec![
            edge("I", "B1"),
            edge("I", "B2"),
            edge("B1", "P1"),
            edge("B2", "P2"),
            edge("P1", "M"),
            edge("P2", "M"),
            edge("M", "S"),
        ],
    }
}

/// An ingredients node fanning out to `count` single-node blocks.
#[allow(dead_code)]
pub fn fan_out_graph(count: usize) -> FlowGraph {
    let mut graph = FlowGraph::new();
    graph.insert_node(node("I", NodeKind::Ingredients));
    for index in 1..=count {
        let id = format!("B{}", index);
        graph.insert_node(node(&id, NodeKind::Block));
        graph.insert_edge(edge("I", &id));
    }
    graph
}

/// Position of `id` after layout; panics if it is missing.
#[allow(dead_code)]
pub fn position_of(nodes: &[GraphNode], id: &str) -> Position {
    nodes
        .iter()
        .find(|n| n.id == id)
        .and_then(|n| n.position)
        .unwrap_or_else(|| panic!("node '{}' has no position", id))
}

#[allow(dead_code)]
pub fn handles_of(edges: &[GraphEdge], id: &str) -> (Side, Side) {
    edges
        .iter()
        .find(|e| e.id == id)
        .and_then(GraphEdge::handles)
        .unwrap_or_else(|| panic!("edge '{}' has no handles", id))
}

/// Feeds `fragments` in order to a fresh cursor and collects every id it returns.
#[allow(dead_code)]
pub fn collect_ids<'a>(fragments: impl IntoIterator<Item = &'a str>) -> (Vec<String>, Vec<String>) {
    let mut cursor = ParseCursor::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for fragment in fragments {
        let extracted = cursor.feed(fragment).expect("cursor is open");
        nodes.extend(extracted.nodes.into_iter().map(|n| n.id));
        edges.extend(extracted.edges.into_iter().map(|e| e.id));
    }
    (nodes, edges)
}

#[allow(dead_code)]
pub fn sorted(ids: &[&str]) -> Vec<String> {
    let mut ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    ids.sort();
    ids
}
