//! # Mise - Streamed Recipe Graphs
//!
//! **Mise** turns a language model's streamed answer into a laid-out recipe
//! diagram. The model emits a single JSON document describing the recipe as
//! a graph of steps, but it emits it a few characters at a time and no
//! prefix is guaranteed to parse. Mise recovers complete steps and links as
//! soon as they close, and computes a deterministic block layout for
//! whatever has arrived.
//!
//! ## Core Workflow
//!
//! 1.  **Extract**: feed each text fragment to a [`ParseCursor`](extract::ParseCursor). It returns the nodes and edges that became complete, each exactly once.
//! 2.  **Accumulate**: add them to a working [`FlowGraph`](graph::FlowGraph).
//! 3.  **Lay out**: run the [`LayoutEngine`](layout::LayoutEngine) over the working graph to assign positions and edge handles.
//! 4.  **Complete**: when the stream ends, parse and validate the final document with [`parse_document`](wire::parse_document) and lay it out one last time.
//!
//! [`FlowSession`](session::FlowSession) bundles all four steps.
//!
//! ## Quick Start
//!
//! ```rust
//! use mise::prelude::*;
//!
//! let document = r#"{
//!   "nodes": [
//!     {"id": "i", "type": "ingredientNode", "data": {"label": "Ingredients",
//!       "ingredients": [{"name": "flour", "quantity": "500 g"}]}},
//!     {"id": "b1", "type": "blockNode", "data": {"label": "Dough"}},
//!     {"id": "b2", "type": "blockNode", "data": {"label": "Sauce"}},
//!     {"id": "m", "type": "cookingNode", "data": {"label": "Bake"}}
//!   ],
//!   "edges": [
//!     {"id": "e1", "source": "i", "target": "b1"},
//!     {"id": "e2", "source": "i", "target": "b2"},
//!     {"id": "e3", "source": "b1", "target": "m", "time": "1 h"},
//!     {"id": "e4", "source": "b2", "target": "m"}
//!   ]
//! }"#;
//!
//! let mut session = FlowSession::new(LayoutEngine::builder().viewport_width(1400.0).build());
//!
//! // Simulate a stream delivering the document in small pieces.
//! let chars: Vec<char> = document.chars().collect();
//! for chunk in chars.chunks(16) {
//!     let fragment: String = chunk.iter().collect();
//!     let update = session.feed(&fragment)?;
//!     if update.changed() {
//!         println!("{} nodes on screen", session.graph().len());
//!     }
//! }
//!
//! let graph = session.complete(document)?;
//! assert_eq!(graph.len(), 4);
//! assert!(graph.nodes.iter().all(|n| n.position.is_some()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod extract;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod session;
pub mod wire;
