//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the mise crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use mise::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/recipe.json")?;
//! let mut graph = parse_document(&json)?;
//! LayoutEngine::default().apply(&mut graph);
//! println!("{}", to_document(&graph));
//! # Ok(())
//! # }
//! ```

// Streaming extraction and accumulation
pub use crate::extract::{Extracted, ParseCursor};
pub use crate::session::{FlowSession, SessionState, SessionUpdate};

// Layout
pub use crate::layout::{LayoutConfig, LayoutEngine, LayoutStrategy, assign_handles, layout};

// Graph types
pub use crate::graph::{FlowGraph, GraphEdge, GraphNode, Ingredient, NodeKind, Position, Side};

// Wire format
pub use crate::wire::{IntoFlow, parse_document, to_document};

// Error types
pub use crate::error::{DocumentError, ExtractError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
