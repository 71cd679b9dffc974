mod classify;
mod edges;
mod levels;
pub(crate) mod types;
pub use classify::{classify, default_style, resolve_style, text_emphasis};
pub use edges::{NodeIndex, resolve_edge};
pub use levels::{layout_nodes, quantize_level};
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::{Graph, Node, NodeKind};
use crate::text_metrics;
use crate::theme::Theme;
use edges::resolve_edges;
use levels::{assign_levels, effective_band_height};

/// Lays out a whole graph: level assignment first, then edge curves against
/// the placed nodes, then per-node classification, style and box size.
///
/// The graph is only read; calling this again with a new viewport width
/// recomputes everything from scratch.
pub fn compute_layout(graph: &Graph, theme: &Theme, config: &LayoutConfig) -> Layout {
    let (placed, bands) = assign_levels(&graph.nodes, config);

    let index = NodeIndex::new(&placed);
    let edges = resolve_edges(&graph.edges, &index);

    let nodes: Vec<NodeLayout> = placed
        .iter()
        .map(|p| build_node_layout(&graph.nodes[p.index], p, theme, config))
        .collect();

    let band_height = effective_band_height(config);
    let height = bands
        .iter()
        .map(|band| band.row)
        .max()
        .map(|row| (row + 1) as f32 * band_height)
        .unwrap_or(0.0);
    let width = if config.viewport_width.is_finite() {
        config.viewport_width.max(0.0)
    } else {
        0.0
    };

    tracing::trace!(
        nodes = nodes.len(),
        edges = edges.len(),
        dropped = graph.edges.len() - edges.len(),
        bands = bands.len(),
        "computed layout"
    );

    Layout {
        nodes,
        edges,
        bands,
        width,
        height,
    }
}

fn build_node_layout(
    node: &Node,
    placed: &PlacedNode,
    theme: &Theme,
    config: &LayoutConfig,
) -> NodeLayout {
    let classification = classify(node);
    let style = resolve_style(node, classification, theme);
    let label = measure_label(&node.kind, &style, config);
    NodeLayout {
        id: node.id.clone(),
        x: placed.position.x,
        y: placed.position.y,
        width: label.width + style.padding * 2.0,
        height: label.height + style.padding * 2.0,
        level: placed.level,
        band: placed.band,
        kind: node.kind.clone(),
        classification,
        style,
        label,
    }
}

/// Size of the node's content box. Formulas are opaque to us, so they stay
/// on one line; text wraps at the node's max width.
pub fn measure_label(kind: &NodeKind, style: &NodeStyle, config: &LayoutConfig) -> TextBlock {
    let lines = match kind {
        NodeKind::Formula { latex } if latex.is_empty() => Vec::new(),
        NodeKind::Formula { latex } => vec![latex.clone()],
        NodeKind::Text { content } => text_metrics::wrap_text(
            content,
            style.max_width,
            style.font_size,
            &style.font_family,
        ),
    };
    let widest = lines
        .iter()
        .map(|line| text_metrics::measure_text_width(line, style.font_size, &style.font_family))
        .fold(0.0f32, f32::max);
    let line_height = style.font_size * config.label_line_height;
    TextBlock {
        width: widest.min(style.max_width),
        height: lines.len().max(1) as f32 * line_height,
        lines,
    }
}
