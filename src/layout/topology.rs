use crate::graph::{FlowGraph, GraphEdge, GraphNode, NodeKind};
use ahash::{AHashMap, AHashSet};

/// Parent/child lists built from the edges of one layout pass.
///
/// Edges naming a node that is not present are ignored, which is normal
/// while a stream is still delivering nodes. Child lists keep edge order;
/// duplicate links between the same pair count once.
pub struct Adjacency<'a> {
    kinds: AHashMap<&'a str, NodeKind>,
    children: AHashMap<&'a str, Vec<&'a str>>,
    parents: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    pub fn new(nodes: &'a [GraphNode], edges: &'a [GraphEdge]) -> Self {
        let kinds: AHashMap<&'a str, NodeKind> = FlowGraph::index_nodes(nodes)
            .into_iter()
            .map(|(id, node)| (id, node.kind))
            .collect();
        let mut children: AHashMap<&'a str, Vec<&'a str>> = AHashMap::new();
        let mut parents: AHashMap<&'a str, Vec<&'a str>> = AHashMap::new();

        for edge in edges {
            let (source, target) = (edge.source.as_str(), edge.target.as_str());
            if !kinds.contains_key(source) || !kinds.contains_key(target) {
                continue;
            }
            let out = children.entry(source).or_default();
            if !out.contains(&target) {
                out.push(target);
            }
            let inc = parents.entry(target).or_default();
            if !inc.contains(&source) {
                inc.push(source);
            }
        }

        Self {
            kinds,
            children,
            parents,
        }
    }

    pub fn children(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parents(&self, id: &str) -> &[&'a str] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.kinds.get(id).copied()
    }

    /// A node where two or more branches converge.
    pub fn is_merge_point(&self, id: &str) -> bool {
        self.parents(id).len() > 1
    }
}

/// One parallel pipeline: a block head and the sequential steps after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockChain<'a> {
    pub head: &'a str,
    /// The head followed by its sequential successors, in order.
    pub nodes: Vec<&'a str>,
    /// Where this pipeline converges with others, if it does.
    pub merge: Option<&'a str>,
}

/// The ingredients → blocks → merge structure of a recipe graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology<'a> {
    pub ingredients: &'a str,
    pub blocks: Vec<BlockChain<'a>>,
    /// Distinct merge nodes in the order blocks first reach them.
    pub merges: Vec<&'a str>,
}

impl<'a> Topology<'a> {
    /// Recognises the block structure, or returns `None` when there is no
    /// ingredients node or it has no block children.
    pub fn detect(
        nodes: &'a [GraphNode],
        adjacency: &Adjacency<'a>,
        max_depth: usize,
    ) -> Option<Self> {
        let ingredients = nodes.iter().find(|n| n.is_ingredients())?.id.as_str();
        let heads: Vec<&'a str> = adjacency
            .children(ingredients)
            .iter()
            .copied()
            .filter(|id| adjacency.kind(id) == Some(NodeKind::Block))
            .collect();
        if heads.is_empty() {
            return None;
        }

        let mut claimed: AHashSet<&'a str> = AHashSet::new();
        claimed.insert(ingredients);
        let mut blocks = Vec::with_capacity(heads.len());
        for head in heads {
            if !claimed.insert(head) {
                continue;
            }
            blocks.push(walk_chain(head, adjacency, &mut claimed, max_depth));
        }

        let mut merges: Vec<&'a str> = Vec::new();
        for merge in blocks.iter().filter_map(|b| b.merge) {
            if !claimed.contains(merge) && !merges.contains(&merge) {
                merges.push(merge);
            }
        }

        Some(Self {
            ingredients,
            blocks,
            merges,
        })
    }
}

/// Follows a block's single-child chain until it reaches a merge point, a
/// node already taken by another chain, a dead end, or the depth cap.
///
/// A child with several parents ends the chain and becomes the block's merge,
/// even when the current node has other children to follow.
fn walk_chain<'a>(
    head: &'a str,
    adjacency: &Adjacency<'a>,
    claimed: &mut AHashSet<&'a str>,
    max_depth: usize,
) -> BlockChain<'a> {
    let mut nodes = vec![head];
    let mut merge = None;
    let mut current = head;

    for _ in 0..max_depth {
        let children = adjacency.children(current);
        if let Some(point) = children.iter().find(|c| adjacency.is_merge_point(c)) {
            merge = Some(*point);
            break;
        }
        let Some(&next) = children.first() else {
            break;
        };
        if adjacency.kind(next) == Some(NodeKind::Ingredients) || !claimed.insert(next) {
            break;
        }
        nodes.push(next);
        current = next;
    }

    BlockChain { head, nodes, merge }
}
