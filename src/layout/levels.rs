use std::collections::BTreeMap;

use crate::config::{BandGaps, LayoutConfig};
use crate::ir::Node;

use super::{BandLayout, PlacedNode, Point};

/// Most rows a preserved-gap layout may span before it falls back to
/// compact rows.
pub const MAX_PRESERVED_ROWS: i128 = 10_000;

/// Quantizes a raw y into its level. Non-finite input lands on level 0.
pub fn quantize_level(raw_y: f32, band_offset: f32, band_height: f32) -> i64 {
    let level = ((raw_y + band_offset) / band_height).floor();
    if level.is_finite() { level as i64 } else { 0 }
}

pub(super) fn effective_band_height(config: &LayoutConfig) -> f32 {
    if config.band_height.is_finite() && config.band_height > 0.0 {
        config.band_height
    } else {
        LayoutConfig::default().band_height
    }
}

/// Buckets nodes into levels by raw y and spreads each level evenly across
/// the viewport. Output is grouped by ascending level, input order within a
/// level, and has exactly one entry per input node.
pub(super) fn assign_levels(
    nodes: &[Node],
    config: &LayoutConfig,
) -> (Vec<PlacedNode>, Vec<BandLayout>) {
    let band_height = effective_band_height(config);
    if band_height != config.band_height {
        tracing::warn!(
            band_height = config.band_height,
            fallback = band_height,
            "band height must be positive; using default"
        );
    }

    let mut levels: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        let level = quantize_level(node.y, config.band_offset, band_height);
        levels.entry(level).or_default().push(idx);
    }

    let viewport = config.viewport_width;
    let viewport_valid = viewport.is_finite() && viewport > 0.0;
    if !viewport_valid && !nodes.is_empty() {
        tracing::debug!(viewport, "viewport width not usable yet; collapsing nodes to x=0");
    }

    // Rows below zero cannot be drawn, so preserved gaps are anchored at the
    // lowest level when it is negative.
    let row_base = i128::from(levels.keys().next().copied().unwrap_or(0).min(0));
    let top_level = i128::from(levels.keys().next_back().copied().unwrap_or(0));
    let mut band_gaps = config.band_gaps;
    if band_gaps == BandGaps::Preserve && top_level - row_base >= MAX_PRESERVED_ROWS {
        tracing::warn!(
            span = %(top_level - row_base),
            max = %MAX_PRESERVED_ROWS,
            "level span too wide to preserve gaps; compacting rows"
        );
        band_gaps = BandGaps::Compact;
    }

    let mut placed = Vec::with_capacity(nodes.len());
    let mut bands = Vec::with_capacity(levels.len());
    for (dense_idx, (level, members)) in levels.into_iter().enumerate() {
        let row = match band_gaps {
            BandGaps::Compact => dense_idx,
            BandGaps::Preserve => {
                usize::try_from(i128::from(level) - row_base).unwrap_or(dense_idx)
            }
        };
        let y = row as f32 * band_height + band_height / 2.0;
        let slot = if viewport_valid {
            viewport / (members.len() + 1) as f32
        } else {
            0.0
        };

        let mut ids = Vec::with_capacity(members.len());
        for (i, idx) in members.into_iter().enumerate() {
            let node = &nodes[idx];
            ids.push(node.id.clone());
            placed.push(PlacedNode {
                id: node.id.clone(),
                index: idx,
                level,
                band: row,
                position: Point::new((i + 1) as f32 * slot, y),
            });
        }
        bands.push(BandLayout {
            level,
            row,
            y,
            nodes: ids,
        });
    }

    (placed, bands)
}

/// Level assignment alone: the display position of every node.
pub fn layout_nodes(nodes: &[Node], config: &LayoutConfig) -> Vec<PlacedNode> {
    assign_levels(nodes, config).0
}
