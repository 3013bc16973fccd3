use regex::Regex;
use std::sync::LazyLock;

static NODES_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""nodes"\s*:\s*\["#).expect("nodes key pattern is valid"));
static EDGES_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""edges"\s*:\s*\["#).expect("edges key pattern is valid"));

/// The two arrays of the flow document that carry extractable objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKey {
    Nodes,
    Edges,
}

impl ArrayKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrayKey::Nodes => "nodes",
            ArrayKey::Edges => "edges",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            ArrayKey::Nodes => LazyLock::force(&NODES_KEY),
            ArrayKey::Edges => LazyLock::force(&EDGES_KEY),
        }
    }
}

/// Finds `"<key>": [` in a possibly incomplete document and returns the byte
/// offset just past the opening bracket.
pub fn locate_array(buffer: &str, key: ArrayKey) -> Option<usize> {
    key.pattern().find(buffer).map(|m| m.end())
}
