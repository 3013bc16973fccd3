use super::LayoutConfig;
use super::topology::{Adjacency, Topology};
use crate::graph::{GraphNode, Position};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Positions for the block layout.
///
/// Every node in `nodes` receives a position: the ingredients root, block
/// rows, the merge column, the post-merge tail, and finally any node none of
/// those reached.
pub(super) fn place<'a>(
    nodes: &'a [GraphNode],
    adjacency: &Adjacency<'a>,
    topology: &Topology<'a>,
    config: &LayoutConfig,
) -> AHashMap<&'a str, Position> {
    let mut positions: AHashMap<&'a str, Position> = AHashMap::with_capacity(nodes.len());
    let margin = config.margin;
    let rows = topology.blocks.len().max(1);
    let center_y = margin + (rows - 1) as f64 * config.vertical_pitch / 2.0;

    positions.insert(topology.ingredients, Position::new(margin, center_y));

    let block_start_x = margin + config.horizontal_pitch;
    let mut rightmost_x = margin;
    for (row, block) in topology.blocks.iter().enumerate() {
        let y = margin + row as f64 * config.vertical_pitch;
        for (column, id) in block.nodes.iter().enumerate() {
            let x = block_start_x + column as f64 * config.horizontal_pitch;
            rightmost_x = rightmost_x.max(x);
            positions.insert(*id, Position::new(x, y));
        }
    }

    // Right margin, pushed out past the longest block row.
    let merge_x = (config.canvas_width() - margin - config.node_width)
        .max(rightmost_x + config.horizontal_pitch);
    let merge_count = topology.merges.len();
    if merge_count > 0 {
        let merge_top =
            (center_y - (merge_count - 1) as f64 * config.vertical_pitch / 2.0).max(margin);
        for (index, id) in topology.merges.iter().enumerate() {
            let y = merge_top + index as f64 * config.vertical_pitch;
            positions.insert(*id, Position::new(merge_x, y));
        }
    }

    let tail = collect_tail(topology, adjacency, &positions, config.max_depth);
    if !tail.is_empty() {
        let per_row = config.nodes_per_row(merge_x + config.node_width - margin);
        let first_row_y = lowest_y(&positions) + config.vertical_pitch;
        for (index, id) in tail.into_iter().enumerate() {
            let row = index / per_row;
            let column = index % per_row;
            let x = merge_x - column as f64 * config.horizontal_pitch;
            let y = first_row_y + row as f64 * config.vertical_pitch;
            positions.insert(id, Position::new(x, y));
        }
    }

    // Anything still unplaced is stacked in the first block column.
    let mut y = lowest_y(&positions);
    for node in nodes {
        let id = node.id.as_str();
        if positions.contains_key(id) {
            continue;
        }
        y += config.vertical_pitch;
        positions.insert(id, Position::new(block_start_x, y));
    }

    positions
}

/// Nodes reachable from the merge points, breadth-first, skipping anything
/// already placed.
fn collect_tail<'a>(
    topology: &Topology<'a>,
    adjacency: &Adjacency<'a>,
    placed: &AHashMap<&'a str, Position>,
    max_depth: usize,
) -> Vec<&'a str> {
    let mut seen: AHashSet<&'a str> = placed.keys().copied().collect();
    let mut queue: VecDeque<(&'a str, usize)> =
        topology.merges.iter().map(|id| (*id, 0)).collect();
    let mut tail = Vec::new();

    while let Some((id, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for &child in adjacency.children(id) {
            if seen.insert(child) {
                tail.push(child);
                queue.push_back((child, depth + 1));
            }
        }
    }
    tail
}

fn lowest_y(positions: &AHashMap<&str, Position>) -> f64 {
    positions
        .values()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(0.0)
}
