//! The JSON document exchanged with the model, and its strict decoding into graph types.

pub mod conversion;
pub mod document;
pub mod types;

pub use conversion::*;
pub use document::*;
pub use types::*;
