//! Tests for node placement.
mod common;
use common::*;
use mise::layout::{Adjacency, Topology};
use mise::prelude::*;

#[test]
fn test_scenario_block_placement() {
    let graph = scenario_graph();
    let nodes = layout(&graph.nodes, &graph.edges, None);

    assert_eq!(position_of(&nodes, "I"), Position::new(50.0, 125.0));
    assert_eq!(position_of(&nodes, "B1"), Position::new(300.0, 50.0));
    assert_eq!(position_of(&nodes, "P1"), Position::new(550.0, 50.0));
    assert_eq!(position_of(&nodes, "B2"), Position::new(300.0, 200.0));
    assert_eq!(position_of(&nodes, "P2"), Position::new(550.0, 200.0));
    assert_eq!(position_of(&nodes, "M"), Position::new(970.0, 125.0));
    assert_eq!(position_of(&nodes, "S"), Position::new(970.0, 350.0));
}

#[test]
fn test_scenario_rows_and_centering() {
    let graph = scenario_graph();
    let nodes = layout(&graph.nodes, &graph.edges, None);

    let row0 = position_of(&nodes, "B1").y;
    let row1 = position_of(&nodes, "B2").y;
    assert_eq!(position_of(&nodes, "P1").y, row0);
    assert_eq!(position_of(&nodes, "P2").y, row1);
    assert!(row1 > row0);

    let middle = (row0 + row1) / 2.0;
    assert_eq!(position_of(&nodes, "I").y, middle);
    assert_eq!(position_of(&nodes, "M").y, middle);
    assert!(position_of(&nodes, "S").y > position_of(&nodes, "M").y);
}

#[test]
fn test_topology_detection() {
    let graph = scenario_graph();
    let adjacency = Adjacency::new(&graph.nodes, &graph.edges);
    let topology = Topology::detect(&graph.nodes, &adjacency, 64).expect("block structure");

    assert_eq!(topology.ingredients, "I");
    assert_eq!(topology.blocks.len(), 2);
    assert_eq!(topology.blocks[0].nodes, vec!["B1", "P1"]);
    assert_eq!(topology.blocks[0].merge, Some("M"));
    assert_eq!(topology.blocks[1].nodes, vec!["B2", "P2"]);
    assert_eq!(topology.merges, vec!["M"]);
}

#[test]
fn test_merge_found_by_look_ahead_among_several_children() {
    // B1 has two children; the second one is the merge point.
    let graph = FlowGraph {
        nodes: vec![
            node("I", NodeKind::Ingredients),
            node("B1", NodeKind::Block),
            node("B2", NodeKind::Block),
            node("side", NodeKind::Preparation),
            node("M", NodeKind::Cooking),
        ],
        edges: vec![
            edge("I", "B1"),
            edge("I", "B2"),
            edge("B1", "side"),
            edge("B1", "M"),
            edge("B2", "M"),
        ],
    };
    let adjacency = Adjacency::new(&graph.nodes, &graph.edges);
    let topology = Topology::detect(&graph.nodes, &adjacency, 64).unwrap();

    assert_eq!(topology.blocks[0].nodes, vec!["B1"]);
    assert_eq!(topology.blocks[0].merge, Some("M"));

    // "side" is not on any chain or after the merge, so the safety net places it.
    let nodes = layout(&graph.nodes, &graph.edges, None);
    let side = position_of(&nodes, "side");
    assert_eq!(side.x, 300.0);
    assert!(side.y > position_of(&nodes, "B2").y);
}

#[test]
fn test_layout_is_deterministic() {
    let graph = scenario_graph();
    let first = layout(&graph.nodes, &graph.edges, Some(1440.0));
    let second = layout(&graph.nodes, &graph.edges, Some(1440.0));
    assert_eq!(first, second);

    let parsed = parse_document(SCENARIO_JSON).unwrap();
    let third = layout(&parsed.nodes, &parsed.edges, Some(1440.0));
    for id in SCENARIO_NODE_IDS {
        assert_eq!(position_of(&first, id), position_of(&third, id));
    }
}

#[test]
fn test_viewport_width_moves_merge_column() {
    let graph = scenario_graph();
    let wide = layout(&graph.nodes, &graph.edges, Some(2000.0));
    assert_eq!(position_of(&wide, "M").x, 1770.0);

    // Too narrow: the merge column is pushed past the longest block row.
    let narrow = layout(&graph.nodes, &graph.edges, Some(600.0));
    assert_eq!(position_of(&narrow, "M").x, 800.0);
}

#[test]
fn test_post_merge_snake_packs_right_to_left() {
    let mut graph = scenario_graph();
    let mut previous = "S".to_string();
    for index in 1..=5 {
        let id = format!("T{}", index);
        graph.insert_node(node(&id, NodeKind::Serving));
        graph.insert_edge(edge(&previous, &id));
        previous = id;
    }
    let nodes = layout(&graph.nodes, &graph.edges, None);

    // Four nodes fit per row across 1200 units: S, T1, T2, T3 then T4, T5.
    let s = position_of(&nodes, "S");
    assert_eq!(position_of(&nodes, "T1"), Position::new(s.x - 250.0, s.y));
    assert_eq!(position_of(&nodes, "T3"), Position::new(s.x - 750.0, s.y));
    assert_eq!(position_of(&nodes, "T4"), Position::new(s.x, s.y + 150.0));
    assert_eq!(position_of(&nodes, "T5"), Position::new(s.x - 250.0, s.y + 150.0));
}

#[test]
fn test_multiple_merge_points_share_the_merge_column() {
    let mut graph = fan_out_graph(4);
    for id in ["M1", "M2"] {
        graph.insert_node(node(id, NodeKind::Cooking));
    }
    for (block, merge) in [("B1", "M1"), ("B2", "M1"), ("B3", "M2"), ("B4", "M2")] {
        graph.insert_edge(edge(block, merge));
    }
    let nodes = layout(&graph.nodes, &graph.edges, None);

    let m1 = position_of(&nodes, "M1");
    let m2 = position_of(&nodes, "M2");
    assert_eq!(m1.x, m2.x);
    assert_eq!(m1.y, 200.0);
    assert_eq!(m2.y, 350.0);
    // Centered as a pair on the ingredients row.
    assert_eq!((m1.y + m2.y) / 2.0, position_of(&nodes, "I").y);
}

#[test]
fn test_disconnected_node_is_stacked_below() {
    let mut graph = scenario_graph();
    graph.insert_node(node("X", NodeKind::Other));
    let nodes = layout(&graph.nodes, &graph.edges, None);

    assert_eq!(position_of(&nodes, "X"), Position::new(300.0, 500.0));
}

#[test]
fn test_fallback_places_chain_on_one_row() {
    let graph = FlowGraph {
        nodes: vec![
            node("C", NodeKind::Cooking),
            node("A", NodeKind::Preparation),
            node("B", NodeKind::Preparation),
        ],
        edges: vec![edge("A", "B"), edge("B", "C")],
    };
    let engine = LayoutEngine::default();
    assert_eq!(
        engine.strategy(&graph.nodes, &graph.edges),
        LayoutStrategy::RowPacking
    );

    let nodes = engine.layout(&graph.nodes, &graph.edges);
    let (a, b, c) = (
        position_of(&nodes, "A"),
        position_of(&nodes, "B"),
        position_of(&nodes, "C"),
    );
    assert_eq!(a, Position::new(260.0, 50.0));
    assert_eq!(b, Position::new(510.0, 50.0));
    assert_eq!(c, Position::new(760.0, 50.0));
}

#[test]
fn test_fallback_alternates_row_direction() {
    let mut graph = FlowGraph::new();
    for index in 1..=6 {
        graph.insert_node(node(&format!("n{}", index), NodeKind::Cooking));
        if index > 1 {
            graph.insert_edge(edge(&format!("n{}", index - 1), &format!("n{}", index)));
        }
    }
    let nodes = layout(&graph.nodes, &graph.edges, None);

    assert_eq!(position_of(&nodes, "n1"), Position::new(135.0, 50.0));
    assert_eq!(position_of(&nodes, "n4"), Position::new(885.0, 50.0));
    // Second row runs right to left.
    assert_eq!(position_of(&nodes, "n5"), Position::new(635.0, 200.0));
    assert_eq!(position_of(&nodes, "n6"), Position::new(385.0, 200.0));
}

#[test]
fn test_ingredients_without_blocks_falls_back() {
    let graph = FlowGraph {
        nodes: vec![
            node("I", NodeKind::Ingredients),
            node("P", NodeKind::Preparation),
        ],
        edges: vec![edge("I", "P")],
    };
    let engine = LayoutEngine::default();
    assert_eq!(
        engine.strategy(&graph.nodes, &graph.edges),
        LayoutStrategy::RowPacking
    );
    let nodes = engine.layout(&graph.nodes, &graph.edges);
    assert!(position_of(&nodes, "I").x < position_of(&nodes, "P").x);
}

#[test]
fn test_empty_graph() {
    assert!(layout(&[], &[], None).is_empty());
    assert!(assign_handles(&[], &[]).is_empty());
}

#[test]
fn test_cycles_terminate() {
    let graph = FlowGraph {
        nodes: vec![
            node("I", NodeKind::Ingredients),
            node("B1", NodeKind::Block),
            node("P1", NodeKind::Preparation),
            node("A", NodeKind::Cooking),
            node("Z", NodeKind::Cooking),
        ],
        edges: vec![
            edge("I", "B1"),
            edge("B1", "P1"),
            edge("P1", "B1"),
            edge("A", "Z"),
            edge("Z", "A"),
        ],
    };
    let nodes = layout(&graph.nodes, &graph.edges, None);
    assert_eq!(nodes.len(), 5);
    assert!(nodes.iter().all(|n| n.position.is_some()));

    // A pure cycle with no root goes through the fallback.
    let ring = FlowGraph {
        nodes: vec![
            node("A", NodeKind::Cooking),
            node("B", NodeKind::Cooking),
            node("C", NodeKind::Cooking),
        ],
        edges: vec![edge("A", "B"), edge("B", "C"), edge("C", "A")],
    };
    let nodes = layout(&ring.nodes, &ring.edges, None);
    assert!(position_of(&nodes, "A").x < position_of(&nodes, "B").x);
    assert!(position_of(&nodes, "B").x < position_of(&nodes, "C").x);
}

#[test]
fn test_long_tail_beyond_depth_cap_is_still_placed() {
    let mut graph = scenario_graph();
    let mut previous = "S".to_string();
    for index in 0..40 {
        let id = format!("T{}", index);
        graph.insert_node(node(&id, NodeKind::Cooking));
        graph.insert_edge(edge(&previous, &id));
        previous = id;
    }
    let engine = LayoutEngine::builder().max_depth(8).build();
    let nodes = engine.layout(&graph.nodes, &graph.edges);

    assert_eq!(nodes.len(), graph.nodes.len());
    assert!(nodes.iter().all(|n| n.position.is_some()));
}

#[test]
fn test_dangling_edges_are_ignored_while_streaming() {
    let graph = FlowGraph {
        nodes: vec![node("I", NodeKind::Ingredients), node("B1", NodeKind::Block)],
        edges: vec![edge("I", "B1"), edge("I", "B2"), edge("B1", "ghost")],
    };
    let nodes = layout(&graph.nodes, &graph.edges, None);
    assert_eq!(position_of(&nodes, "I"), Position::new(50.0, 50.0));
    assert_eq!(position_of(&nodes, "B1"), Position::new(300.0, 50.0));
}

#[test]
fn test_builder_overrides_geometry() {
    let graph = scenario_graph();
    let engine = LayoutEngine::builder()
        .margin(10.0)
        .horizontal_pitch(200.0)
        .vertical_pitch(100.0)
        .viewport_width(1000.0)
        .build();
    let nodes = engine.layout(&graph.nodes, &graph.edges);

    assert_eq!(position_of(&nodes, "I"), Position::new(10.0, 60.0));
    assert_eq!(position_of(&nodes, "P2"), Position::new(410.0, 110.0));
    assert_eq!(engine.config().canvas_width(), 1000.0);
}

#[test]
fn test_layout_config_from_json() {
    let config: LayoutConfig = serde_json::from_str(r#"{"margin": 20, "viewport_width": 900}"#).unwrap();
    assert_eq!(config.margin, 20.0);
    assert_eq!(config.viewport_width, Some(900.0));
    assert_eq!(config.horizontal_pitch, LayoutConfig::default().horizontal_pitch);
}
