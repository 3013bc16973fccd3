//! Integration tests for mise
//!
//! End-to-end tests that replay whole model streams through a session and
//! check the final diagram.
//!
mod common;
use common::*;
use mise::prelude::*;
use serde_json::{Value, json};

/// A larger recipe: three blocks of uneven length, one merge, a short tail.
fn three_block_document() -> String {
    let mut nodes = vec![json!({
        "id": "ing", "type": "ingredientNode",
        "data": {"label": "Ingredients", "ingredients": [{"name": "rice", "quantity": "300 g"}]}
    })];
    let mut edges = Vec::new();
    let mut link = |source: &str, target: &str| {
        let id = format!("{}->{}", source, target);
        edges.push(json!({"id": id, "source": source, "target": target}));
    };

    for (block, steps) in [(1, 3), (2, 1), (3, 2)] {
        let head = format!("block{}", block);
        nodes.push(json!({"id": head, "type": "blockNode", "data": {"label": format!("Block {}", block)}}));
        link("ing", &head);
        let mut previous = head;
        for step in 1..=steps {
            let id = format!("b{}s{}", block, step);
            nodes.push(json!({"id": id, "type": "preparationNode", "data": {"label": "Step"}}));
            link(&previous, &id);
            previous = id;
        }
        link(&previous, "merge");
    }
    nodes.push(json!({"id": "merge", "type": "cookingNode", "data": {"label": "Combine"}}));
    nodes.push(json!({"id": "plate", "type": "servingNode", "data": {"label": "Plate"}}));
    link("merge", "plate");

    // Nodes first, the way the model is prompted to emit them.
    format!(
        "{{\"nodes\": {},\n\"edges\": {}}}",
        serde_json::to_string_pretty(&nodes).unwrap(),
        serde_json::to_string_pretty(&edges).unwrap()
    )
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_full_stream_replay() {
        let document = three_block_document();
        let mut session = FlowSession::new(LayoutEngine::default());

        let chars: Vec<char> = document.chars().collect();
        let mut steps_with_changes = 0;
        for chunk in chars.chunks(24) {
            let fragment: String = chunk.iter().collect();
            if session.feed(&fragment).expect("stream accepted").changed() {
                steps_with_changes += 1;
            }
        }
        assert!(steps_with_changes > 1, "graph should grow incrementally");

        let graph = session.complete(&document).expect("final document is valid");
        assert_eq!(graph.len(), 12);
        assert_eq!(graph.edges.len(), 13);

        let merge = position_of(&graph.nodes, "merge");
        let plate = position_of(&graph.nodes, "plate");
        assert_eq!(merge.x, plate.x);
        assert!(plate.y > merge.y);

        // Block rows, in the order the ingredients node links them.
        assert_eq!(position_of(&graph.nodes, "block1").y, 50.0);
        assert_eq!(position_of(&graph.nodes, "block2").y, 200.0);
        assert_eq!(position_of(&graph.nodes, "block3").y, 350.0);
        assert_eq!(position_of(&graph.nodes, "b1s3"), Position::new(1050.0, 50.0));
        assert_eq!(position_of(&graph.nodes, "ing").y, 200.0);

        // The longest block pushes the merge column out.
        assert_eq!(merge, Position::new(1300.0, 200.0));
    }

    #[test]
    fn test_chunk_size_does_not_change_final_layout() {
        let document = three_block_document();
        let mut reference: Option<FlowGraph> = None;

        for size in [1, 9, 64, document.len()] {
            let mut session = FlowSession::new(LayoutEngine::default());
            let chars: Vec<char> = document.chars().collect();
            for chunk in chars.chunks(size) {
                let fragment: String = chunk.iter().collect();
                session.feed(&fragment).unwrap();
            }
            let streamed = session.graph().clone();
            let completed = session.complete(&document).unwrap().clone();
            assert_eq!(streamed, completed, "chunk size {}", size);

            match &reference {
                Some(expected) => assert_eq!(&completed, expected),
                None => reference = Some(completed),
            }
        }
    }

    #[test]
    fn test_rendered_output_shape() {
        let mut session = FlowSession::new(LayoutEngine::builder().viewport_width(1800.0).build());
        session.feed(SCENARIO_JSON).unwrap();
        let graph = session.complete(SCENARIO_JSON).unwrap();
        let document = to_document(graph);

        let nodes = document["nodes"].as_array().unwrap();
        let edges = document["edges"].as_array().unwrap();
        assert!(nodes.iter().all(|n| n["position"]["x"].is_number()));
        assert!(edges.iter().all(|e| {
            matches!(&e["sourceHandle"], Value::String(_))
                && matches!(&e["targetHandle"], Value::String(_))
        }));

        let merge = nodes.iter().find(|n| n["id"] == "M").unwrap();
        assert_eq!(merge["position"]["x"].as_f64(), Some(1570.0));
    }

    #[test]
    fn test_stream_cut_off_midway() {
        let document = three_block_document();
        let cut = &document[..document.find("\"id\": \"merge\"").unwrap()];

        let mut session = FlowSession::new(LayoutEngine::default());
        session.feed(cut).unwrap();
        let partial = session.graph().len();
        // Everything before the merge node; no edges have arrived.
        assert_eq!(partial, 10);
        assert_eq!(session.graph().edges.len(), 0);

        session.fail();
        assert_eq!(session.state(), SessionState::Failed);
        let graph = session.into_graph();
        assert_eq!(graph.len(), partial);
        assert!(graph.nodes.iter().all(|n| n.position.is_some()));
    }
}
