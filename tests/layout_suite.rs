use std::collections::BTreeSet;
use std::path::Path;

use spatial_summary_renderer::layout::{Emphasis, Point};
use spatial_summary_renderer::parser::parse_graphs;
use spatial_summary_renderer::{
    BandGaps, Graph, LayoutConfig, RenderConfig, RenderOptions, Theme, compute_layout,
    parse_graph, render_svg, render_with_options,
};

fn fixture(rel: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    std::fs::read_to_string(&path).expect("fixture read failed")
}

fn layout_config(width: f32) -> LayoutConfig {
    LayoutConfig {
        viewport_width: width,
        ..LayoutConfig::default()
    }
}

fn ids(graph: &Graph) -> BTreeSet<String> {
    graph.nodes.iter().map(|n| n.id.clone()).collect()
}

#[test]
fn scenario_fixture_matches_expected_geometry() {
    let graph = parse_graph(&fixture("scenario.json")).expect("parse failed");
    let layout = compute_layout(&graph, &Theme::summary_default(), &layout_config(300.0));

    let a = layout.node("A").unwrap();
    let b = layout.node("B").unwrap();
    let c = layout.node("C").unwrap();
    assert_eq!((a.x, a.y), (150.0, 50.0));
    assert_eq!((b.x, b.y), (100.0, 150.0));
    assert_eq!((c.x, c.y), (200.0, 150.0));
    assert_eq!(b.classification.emphasis, Emphasis::Strong);
    assert_eq!(c.classification.emphasis, Emphasis::Emphasized);

    let controls: Vec<Point> = layout.edges.iter().map(|e| e.curve.control).collect();
    assert_eq!(controls, vec![Point::new(125.0, 100.0), Point::new(175.0, 100.0)]);
}

#[test]
fn analysis_response_lays_out_every_node() {
    let input = fixture("analysis_response.json");
    let graph = parse_graph(&input).expect("parse failed");
    let layout = compute_layout(&graph, &Theme::summary_default(), &layout_config(800.0));

    let out: BTreeSet<String> = layout.nodes.iter().map(|n| n.id.clone()).collect();
    assert_eq!(out, ids(&graph));
    // fermat -> euler points at a node that does not exist.
    assert_eq!(layout.edges.len(), graph.edges.len() - 1);
    assert_eq!(layout.bands.len(), 4);
    assert_eq!(layout.node("fermat").unwrap().y, 350.0);

    let lagrange = layout.node("lagrange").unwrap();
    assert_eq!(lagrange.classification.emphasis, Emphasis::Strong);
    assert_eq!(lagrange.style.font_size, 20.0);
    assert_eq!(lagrange.style.color, "#1a237e");
    assert_eq!(layout.node("cosets").unwrap().style.max_width, 160.0);

    for node in &layout.nodes {
        assert!(node.x > 0.0 && node.x < 800.0, "{} touches the edge", node.id);
    }
}

#[test]
fn analysis_response_yields_one_graph_per_document() {
    let graphs = parse_graphs(&fixture("analysis_response.json")).expect("parse failed");
    assert_eq!(graphs.len(), 2);
    assert_eq!(graphs[1].nodes.len(), 1);
}

#[test]
fn sparse_levels_compact_or_preserve() {
    let graph = parse_graph(&fixture("sparse_levels.json")).expect("parse failed");
    let theme = Theme::summary_default();

    let compact = compute_layout(&graph, &theme, &layout_config(400.0));
    assert_eq!(compact.node("far").unwrap().y, 150.0);
    assert_eq!(compact.node("farther").unwrap().y, 150.0);
    assert_eq!(compact.height, 200.0);

    let mut config = layout_config(400.0);
    config.band_gaps = BandGaps::Preserve;
    let preserved = compute_layout(&graph, &theme, &config);
    assert_eq!(preserved.node("top").unwrap().y, 50.0);
    assert_eq!(preserved.node("far").unwrap().y, 850.0);
    assert_eq!(preserved.height, 900.0);
}

#[test]
fn malformed_input_degrades_instead_of_failing() {
    let graph = parse_graph(&fixture("malformed.json5")).expect("parse failed");
    let layout = compute_layout(&graph, &Theme::summary_default(), &layout_config(300.0));
    assert_eq!(layout.nodes.len(), 3);
    assert_eq!(layout.edges.len(), 1);
    assert!(layout.node("a").unwrap().label.lines.is_empty());
    assert_eq!(
        layout.node("c").unwrap().classification.emphasis,
        Emphasis::Strong
    );

    let svg = render_svg(&layout, &Theme::summary_default(), &RenderConfig::default());
    assert_eq!(svg.matches("<path").count(), 1);
}

#[test]
fn layout_is_repeatable_across_resizes() {
    let graph = parse_graph(&fixture("analysis_response.json")).expect("parse failed");
    let theme = Theme::modern();
    let before = compute_layout(&graph, &theme, &layout_config(1024.0));
    let _ = compute_layout(&graph, &theme, &layout_config(0.0));
    let after = compute_layout(&graph, &theme, &layout_config(1024.0));
    for (lhs, rhs) in before.nodes.iter().zip(after.nodes.iter()) {
        assert_eq!(lhs.id, rhs.id);
        assert_eq!(lhs.x.to_bits(), rhs.x.to_bits());
        assert_eq!(lhs.y.to_bits(), rhs.y.to_bits());
    }
}

#[test]
fn render_all_fixtures() {
    for rel in [
        "scenario.json",
        "analysis_response.json",
        "sparse_levels.json",
        "malformed.json5",
    ] {
        let options = RenderOptions::summary_default().with_viewport_width(600.0);
        let svg = render_with_options(&fixture(rel), options).expect("render failed");
        assert!(svg.contains("<svg"), "{rel}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{rel}: missing </svg tag");
    }
}
