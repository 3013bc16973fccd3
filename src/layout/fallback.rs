use super::LayoutConfig;
use super::topology::Adjacency;
use crate::graph::{GraphNode, Position};
use ahash::{AHashMap, AHashSet};

/// Boustrophedon row packing for graphs without a block structure.
///
/// Nodes are ordered along their chains, then laid into centered rows that
/// run left-to-right and right-to-left alternately.
pub(super) fn pack_rows<'a>(
    nodes: &'a [GraphNode],
    adjacency: &Adjacency<'a>,
    config: &LayoutConfig,
) -> AHashMap<&'a str, Position> {
    let order = chain_order(nodes, adjacency, config.max_depth);
    let width = config.canvas_width();
    let gap = (config.horizontal_pitch - config.node_width).max(0.0);
    let per_row = config.nodes_per_row(width - 2.0 * config.margin + gap);

    let mut positions = AHashMap::with_capacity(order.len());
    for (row, chunk) in order.chunks(per_row).enumerate() {
        let row_width = chunk.len() as f64 * config.horizontal_pitch - gap;
        let start_x = ((width - row_width) / 2.0).max(config.margin);
        let y = config.margin + row as f64 * config.vertical_pitch;
        for (index, id) in chunk.iter().enumerate() {
            let column = if row % 2 == 0 {
                index
            } else {
                chunk.len() - 1 - index
            };
            let x = start_x + column as f64 * config.horizontal_pitch;
            positions.insert(*id, Position::new(x, y));
        }
    }
    positions
}

/// Roots first (in input order), each followed depth-first by its
/// descendants; nodes only reachable through a cycle come last.
fn chain_order<'a>(
    nodes: &'a [GraphNode],
    adjacency: &Adjacency<'a>,
    max_depth: usize,
) -> Vec<&'a str> {
    let mut visited: AHashSet<&'a str> = AHashSet::with_capacity(nodes.len());
    let mut order = Vec::with_capacity(nodes.len());

    let roots = nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| adjacency.parents(id).is_empty());
    let rest = nodes.iter().map(|n| n.id.as_str());

    for start in roots.chain(rest) {
        if visited.contains(start) {
            continue;
        }
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            if depth >= max_depth {
                continue;
            }
            // Reverse so the first child is visited first.
            for &child in adjacency.children(id).iter().rev() {
                if !visited.contains(child) {
                    stack.push((child, depth + 1));
                }
            }
        }
    }
    order
}
