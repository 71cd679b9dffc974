use crate::layout::{Classification, CurveDescriptor, Layout, NodeStyle, Point};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable view of a computed layout, for renderers that live outside
/// this crate.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub bands: Vec<BandDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub payload: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub level: i64,
    pub band: usize,
    #[serde(flatten)]
    pub classification: Classification,
    pub style: NodeStyle,
    pub lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub source: String,
    pub target: String,
    pub from: Point,
    pub control: Point,
    pub to: Point,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct BandDump {
    pub level: i64,
    pub row: usize,
    pub y: f32,
    pub nodes: Vec<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                node_type: node.kind.name(),
                payload: node.kind.payload().to_string(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                level: node.level,
                band: node.band,
                classification: node.classification,
                style: node.style.clone(),
                lines: node.label.lines.clone(),
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| {
                let CurveDescriptor { from, to, control } = edge.curve;
                EdgeDump {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    from,
                    control,
                    to,
                    path: edge.curve.to_svg_path(),
                }
            })
            .collect();

        let bands = layout
            .bands
            .iter()
            .map(|band| BandDump {
                level: band.level,
                row: band.row,
                y: band.y,
                nodes: band.nodes.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
            bands,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
