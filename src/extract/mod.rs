//! Incremental recovery of nodes and edges from a partially received flow document.
//!
//! A model streams its answer one fragment at a time and no prefix of it is
//! guaranteed to be valid JSON. [`ParseCursor`] accumulates the fragments and,
//! after each one, hands back every node and edge object that has become
//! complete since the previous call.
//!
//! ```rust
//! use mise::extract::ParseCursor;
//!
//! let mut cursor = ParseCursor::new();
//! let first = cursor
//!     .feed(r#"{"nodes":[{"id":"i","type":"ingredientNode","data":{"label":"Pantry"}},{"id":"b"#)
//!     .unwrap();
//! assert_eq!(first.nodes.len(), 1);
//!
//! let second = cursor
//!     .feed(r#"1","type":"blockNode","data":{"label":"Dough"}}],"edges":[]}"#)
//!     .unwrap();
//! assert_eq!(second.nodes[0].id, "b1");
//! ```

mod locate;
mod scanner;

pub use locate::{ArrayKey, locate_array};
pub use scanner::Scanner;

use crate::error::ExtractError;
use crate::graph::{GraphEdge, GraphNode};
use crate::wire::{decode_edge, decode_edge_value, decode_node, decode_node_value};
use ahash::AHashSet;
use std::ops::Range;
use tracing::trace;

/// Objects that became complete during one `feed` call, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Extracted {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Per-stream extraction state.
///
/// One cursor belongs to one stream. It never discards text, and it returns
/// each node id and each edge id at most once over its lifetime.
#[derive(Debug, Default)]
pub struct ParseCursor {
    buffer: String,
    node_scan: Option<Scanner>,
    edge_scan: Option<Scanner>,
    emitted_node_ids: AHashSet<String>,
    emitted_edge_ids: AHashSet<String>,
    closed: bool,
}

impl ParseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `fragment` and returns the objects completed since the last call.
    ///
    /// Malformed content is skipped, never reported. The only error is feeding
    /// a cursor that has been closed.
    pub fn feed(&mut self, fragment: &str) -> Result<Extracted, ExtractError> {
        if self.closed {
            return Err(ExtractError::CursorClosed);
        }
        self.buffer.push_str(fragment);

        let mut extracted = Extracted::default();
        if self.extract_whole_document(&mut extracted) {
            return Ok(extracted);
        }

        for range in scan_array(&self.buffer, ArrayKey::Nodes, &mut self.node_scan) {
            let candidate = &self.buffer[range];
            match decode_node(candidate) {
                Ok(node) => {
                    if self.emitted_node_ids.insert(node.id.clone()) {
                        extracted.nodes.push(node);
                    }
                }
                Err(e) => trace!(error = %e, candidate, "dropping malformed node candidate"),
            }
        }
        for range in scan_array(&self.buffer, ArrayKey::Edges, &mut self.edge_scan) {
            let candidate = &self.buffer[range];
            match decode_edge(candidate) {
                Ok(edge) => {
                    if self.emitted_edge_ids.insert(edge.id.clone()) {
                        extracted.edges.push(edge);
                    }
                }
                Err(e) => trace!(error = %e, candidate, "dropping malformed edge candidate"),
            }
        }
        Ok(extracted)
    }

    /// Marks the stream as over. Further `feed` calls fail.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Everything received so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn emitted_node_count(&self) -> usize {
        self.emitted_node_ids.len()
    }

    pub fn emitted_edge_count(&self) -> usize {
        self.emitted_edge_ids.len()
    }

    /// Happy path: the buffer already holds the whole document.
    ///
    /// Returns `false` when the buffer is not a complete document with a
    /// `nodes` or `edges` array, in which case scanning takes over.
    fn extract_whole_document(&mut self, extracted: &mut Extracted) -> bool {
        // A complete document ends with its closing brace; skip the parse otherwise.
        if !self.buffer.trim_end().ends_with('}') {
            return false;
        }
        let Ok(document) = serde_json::from_str::<serde_json::Value>(&self.buffer) else {
            return false;
        };
        let nodes = document.get("nodes").and_then(serde_json::Value::as_array);
        let edges = document.get("edges").and_then(serde_json::Value::as_array);
        if nodes.is_none() && edges.is_none() {
            return false;
        }

        for value in nodes.into_iter().flatten() {
            match decode_node_value(value) {
                Ok(node) => {
                    if self.emitted_node_ids.insert(node.id.clone()) {
                        extracted.nodes.push(node);
                    }
                }
                Err(e) => trace!(error = %e, "dropping malformed node in complete document"),
            }
        }
        for value in edges.into_iter().flatten() {
            match decode_edge_value(value) {
                Ok(edge) => {
                    if self.emitted_edge_ids.insert(edge.id.clone()) {
                        extracted.edges.push(edge);
                    }
                }
                Err(e) => trace!(error = %e, "dropping malformed edge in complete document"),
            }
        }
        true
    }
}

/// Locates the array on first sight, then advances its scanner over new text.
fn scan_array(buffer: &str, key: ArrayKey, scan: &mut Option<Scanner>) -> Vec<Range<usize>> {
    if scan.is_none() {
        *scan = locate_array(buffer, key).map(Scanner::new);
    }
    match scan {
        Some(scanner) => scanner.advance(buffer),
        None => Vec::new(),
    }
}
