use super::LayoutConfig;
use crate::graph::{FlowGraph, GraphEdge, GraphNode, Position, Side};
use ahash::AHashSet;

/// Handles claimed so far in one assignment pass, keyed `"nodeId:side"`.
///
/// Source and target handles are tracked separately: a node may receive on
/// its left side while also sending from its left side.
#[derive(Debug, Default)]
pub struct HandleAllocation {
    sources: AHashSet<String>,
    targets: AHashSet<String>,
}

impl HandleAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free(&self, source: &str, source_side: Side, target: &str, target_side: Side) -> bool {
        !self.sources.contains(&handle_key(source, source_side))
            && !self.targets.contains(&handle_key(target, target_side))
    }

    pub fn claim(&mut self, source: &str, source_side: Side, target: &str, target_side: Side) {
        self.sources.insert(handle_key(source, source_side));
        self.targets.insert(handle_key(target, target_side));
    }

    /// Picks the first free pair among `preferred`, its mirror, and the two
    /// perpendicular pairs. Falls back to `preferred` when all are taken.
    pub fn choose(&self, source: &str, target: &str, preferred: (Side, Side)) -> (Side, Side) {
        alternatives(preferred)
            .into_iter()
            .find(|&(s, t)| self.is_free(source, s, target, t))
            .unwrap_or(preferred)
    }
}

fn handle_key(node: &str, side: Side) -> String {
    format!("{}:{}", node, side)
}

fn alternatives((source, target): (Side, Side)) -> [(Side, Side); 4] {
    let [first, second] = source.perpendicular();
    [
        (source, target),
        (source.opposite(), target.opposite()),
        (first, first.opposite()),
        (second, second.opposite()),
    ]
}

/// The pair that follows the direction from `source` to `target`: horizontal
/// for nodes on the same row, vertical otherwise.
fn preferred_pair(
    source: Option<Position>,
    target: Option<Position>,
    config: &LayoutConfig,
) -> (Side, Side) {
    let (Some(source), Some(target)) = (source, target) else {
        return (Side::Right, Side::Left);
    };
    let dy = target.y - source.y;
    if dy.abs() < config.node_height / 2.0 {
        if target.x >= source.x {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        }
    } else if dy > 0.0 {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Top, Side::Bottom)
    }
}

pub(super) fn assign(nodes: &[GraphNode], edges: &[GraphEdge], config: &LayoutConfig) -> Vec<GraphEdge> {
    let index = FlowGraph::index_nodes(nodes);
    let mut allocation = HandleAllocation::new();

    edges
        .iter()
        .map(|edge| {
            let source = index.get(edge.source.as_str());
            let target = index.get(edge.target.as_str());
            let fixed = source
                .and_then(|n| n.kind.fixed_handles())
                .or_else(|| target.and_then(|n| n.kind.fixed_handles()));

            let (source_side, target_side) = match fixed {
                Some(pair) => pair,
                None => {
                    let preferred = preferred_pair(
                        source.and_then(|n| n.position),
                        target.and_then(|n| n.position),
                        config,
                    );
                    allocation.choose(&edge.source, &edge.target, preferred)
                }
            };
            allocation.claim(&edge.source, source_side, &edge.target, target_side);

            let mut edge = edge.clone();
            edge.source_handle = Some(source_side);
            edge.target_handle = Some(target_side);
            edge
        })
        .collect()
}
