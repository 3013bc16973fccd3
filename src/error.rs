use thiserror::Error;

/// Errors raised by a [`ParseCursor`](crate::extract::ParseCursor).
///
/// Malformed stream content is never an error; only misuse of the cursor is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Cannot feed a parse cursor after it has been closed")]
    CursorClosed,
}

/// Structural problems found when validating a complete `FlowGraph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Edge '{edge_id}' references node '{missing_node_id}', which is not in the graph")]
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Node id '{0}' appears more than once")]
    DuplicateNodeId(String),

    #[error("Edge id '{0}' appears more than once")]
    DuplicateEdgeId(String),

    #[error("Only one ingredients node is allowed, found '{first}' and '{second}'")]
    DuplicateIngredients { first: String, second: String },
}

/// Errors that can occur while turning a final JSON document into a `FlowGraph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Failed to parse flow document JSON: {0}")]
    JsonParseError(String),

    #[error("Flow document failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to convert flow document: {0}")]
    Conversion(#[from] RecipeConversionError),
}

/// Errors that can occur when converting a custom user format into a `FlowGraph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
