use super::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a step plays in the recipe process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// The single root listing everything that goes into the dish.
    Ingredients,
    Preparation,
    Cooking,
    Serving,
    /// First node of a parallel pipeline hanging off the ingredients root.
    Block,
    /// A generic step with no wire tag; only built programmatically.
    Other,
}

impl NodeKind {
    /// The `type` tag used for this kind in the JSON document, if it has one.
    pub fn wire_tag(self) -> Option<&'static str> {
        match self {
            NodeKind::Ingredients => Some("ingredientNode"),
            NodeKind::Preparation => Some("preparationNode"),
            NodeKind::Cooking => Some("cookingNode"),
            NodeKind::Serving => Some("servingNode"),
            NodeKind::Block => Some("blockNode"),
            NodeKind::Other => None,
        }
    }

    pub fn from_wire_tag(tag: &str) -> Option<Self> {
        match tag {
            "ingredientNode" => Some(NodeKind::Ingredients),
            "preparationNode" => Some(NodeKind::Preparation),
            "cookingNode" => Some(NodeKind::Cooking),
            "servingNode" => Some(NodeKind::Serving),
            "blockNode" => Some(NodeKind::Block),
            _ => None,
        }
    }

    /// Kinds rendered with a single source/target handle pair.
    ///
    /// Any edge touching such a node is routed through exactly this pair.
    pub fn fixed_handles(self) -> Option<(Side, Side)> {
        match self {
            NodeKind::Other => Some((Side::Bottom, Side::Top)),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wire_tag() {
            Some(tag) => write!(f, "{}", tag),
            None => write!(f, "otherNode"),
        }
    }
}

/// A point in diagram space. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single line of the ingredients list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// A step in the recipe process.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub description: Option<String>,
    /// Only ever non-empty for `NodeKind::Ingredients`.
    pub ingredients: Vec<Ingredient>,
    /// Assigned by the layout engine; `None` until the first layout pass.
    pub position: Option<Position>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            description: None,
            ingredients: Vec::new(),
            position: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches an ingredients list. Ignored unless this is the ingredients node.
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        if self.kind == NodeKind::Ingredients {
            self.ingredients = ingredients;
        }
        self
    }

    pub fn is_ingredients(&self) -> bool {
        self.kind == NodeKind::Ingredients
    }
}
