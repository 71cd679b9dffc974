use serde::Serialize;

use crate::ir::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Formula,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Math,
    Plain,
    Strong,
    Emphasized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub display_kind: DisplayKind,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Fully resolved presentation of one node: theme defaults for its
/// classification with the producer's overrides applied on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub color: String,
    pub font_size: f32,
    pub max_width: f32,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub background: String,
    pub border_color: String,
    pub border_width: f32,
    pub padding: f32,
    pub corner_radius: f32,
}

/// A node after level assignment: where it sits and which band it fell in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    /// Position of the node in the input sequence.
    pub index: usize,
    /// Raw quantized level.
    pub level: i64,
    /// Row the level is drawn in.
    pub band: usize,
    pub position: Point,
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    /// Display center.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub level: i64,
    pub band: usize,
    pub kind: NodeKind,
    pub classification: Classification,
    pub style: NodeStyle,
    pub label: TextBlock,
}

impl NodeLayout {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Geometry for a quadratic connector between two node centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveDescriptor {
    pub from: Point,
    pub to: Point,
    pub control: Point,
}

impl CurveDescriptor {
    pub fn to_svg_path(&self) -> String {
        format!(
            "M{},{} Q{},{} {},{}",
            self.from.x, self.from.y, self.control.x, self.control.y, self.to.x, self.to.y
        )
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub source: String,
    pub target: String,
    pub curve: CurveDescriptor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandLayout {
    pub level: i64,
    pub row: usize,
    pub y: f32,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub bands: Vec<BandLayout>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
