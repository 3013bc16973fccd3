pub mod edge;
pub mod flow;
pub mod node;

pub use edge::*;
pub use flow::*;
pub use node::*;
