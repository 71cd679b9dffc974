use serde::{Deserialize, Serialize};

/// Structural payload of a node. The variant decides both how the node is
/// rendered and how it is classified; field presence never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Formula { latex: String },
    Text { content: String },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Formula { .. } => "formula",
            NodeKind::Text { .. } => "text",
        }
    }

    /// The renderable string: the LaTeX source for formulas, the plain
    /// content for text.
    pub fn payload(&self) -> &str {
        match self {
            NodeKind::Formula { latex } => latex,
            NodeKind::Text { content } => content,
        }
    }
}

/// Producer-supplied presentation hints. Every field is optional and wins
/// over the computed default when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    pub color: Option<String>,
    pub font_size: Option<f32>,
    pub max_width: Option<f32>,
}

impl StyleOverride {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.font_size.is_none() && self.max_width.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// Raw x as authored upstream. Kept for dumps; layout ignores it.
    pub x: f32,
    /// Raw y as authored upstream. The only coordinate layout reads.
    pub y: f32,
    pub kind: NodeKind,
    pub style: Option<StyleOverride>,
}

impl Node {
    pub fn formula(id: &str, x: f32, y: f32, latex: &str) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            kind: NodeKind::Formula {
                latex: latex.to_string(),
            },
            style: None,
        }
    }

    pub fn text(id: &str, x: f32, y: f32, content: &str) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            kind: NodeKind::Text {
                content: content.to_string(),
            },
            style: None,
        }
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = Some(style);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// One analysis result: an ordered node list plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, source: &str, target: &str) {
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
