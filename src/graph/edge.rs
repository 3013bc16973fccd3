use serde::{Deserialize, Serialize};
use std::fmt;

/// A side of a node where an edge may attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// The two sides at right angles to this one, bottom/right first.
    pub fn perpendicular(self) -> [Side; 2] {
        if self.is_horizontal() {
            [Side::Bottom, Side::Top]
        } else {
            [Side::Right, Side::Left]
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A causal or temporal link between two steps.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Free-form duration annotation, e.g. "30 min". Changes how the edge is drawn.
    pub wait_time: Option<String>,
    pub label: Option<String>,
    /// Assigned by the layout engine.
    pub source_handle: Option<Side>,
    /// Assigned by the layout engine.
    pub target_handle: Option<Side>,
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            wait_time: None,
            label: None,
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_wait_time(mut self, wait_time: impl Into<String>) -> Self {
        self.wait_time = Some(wait_time.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the edge carries a wait annotation and is drawn as a timed edge.
    pub fn is_timed(&self) -> bool {
        self.wait_time.is_some()
    }

    pub fn handles(&self) -> Option<(Side, Side)> {
        Some((self.source_handle?, self.target_handle?))
    }
}
