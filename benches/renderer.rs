use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spatial_summary_renderer::config::{LayoutConfig, RenderConfig};
use spatial_summary_renderer::ir::{Graph, Node};
use spatial_summary_renderer::layout::compute_layout;
use spatial_summary_renderer::parser::parse_graph;
use spatial_summary_renderer::render::render_svg;
use spatial_summary_renderer::theme::Theme;
use std::hint::black_box;

/// Nodes spread over `levels` bands, each linked to a node in the band above
/// and every tenth one carrying an edge to a missing id.
fn synthetic_graph(nodes: usize, levels: usize) -> Graph {
    let mut graph = Graph::new();
    let levels = levels.max(1);
    for i in 0..nodes {
        let level = i % levels;
        let y = level as f32 * 100.0 - 330.0 + (i % 7) as f32;
        let id = format!("n{i}");
        let node = match i % 4 {
            0 => Node::formula(&id, 0.0, y, "\\int_0^1 x^2\\,dx = \\frac{1}{3}"),
            1 => Node::text(&id, 0.0, y, "Theorem: every bounded monotone sequence converges"),
            2 => Node::text(&id, 0.0, y, "Proof by contradiction"),
            _ => Node::text(&id, 0.0, y, "Remark on the construction above"),
        };
        graph.push_node(node);
        if i >= levels {
            graph.push_edge(&format!("n{}", i - levels), &id);
        }
        if i % 10 == 0 {
            graph.push_edge(&id, "missing");
        }
    }
    graph
}

fn graph_json(nodes: usize) -> String {
    let mut out = String::from("[{\"analysis\": {\"nodes\": [");
    for i in 0..nodes {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            "{{\"id\": \"n{i}\", \"x\": {i}, \"y\": {}, \"type\": \"text\", \"content\": \"Step {i}\"}}",
            (i % 6) * 100
        ));
    }
    out.push_str("], \"edges\": [");
    for i in 1..nodes {
        if i > 1 {
            out.push(',');
        }
        out.push_str(&format!("{{\"source\": \"n{}\", \"target\": \"n{i}\"}}", i - 1));
    }
    out.push_str("]}}]");
    out
}

fn bench_layout(c: &mut Criterion) {
    let theme = Theme::summary_default();
    let config = LayoutConfig {
        viewport_width: 1200.0,
        ..LayoutConfig::default()
    };
    let mut group = c.benchmark_group("layout");
    for size in [10usize, 100, 1000] {
        let graph = synthetic_graph(size, 6);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| compute_layout(black_box(graph), &theme, &config))
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let theme = Theme::summary_default();
    let config = LayoutConfig::default();
    let render = RenderConfig::default();
    let mut group = c.benchmark_group("render_svg");
    for size in [10usize, 100, 1000] {
        let layout = compute_layout(&synthetic_graph(size, 8), &theme, &config);
        group.bench_with_input(BenchmarkId::from_parameter(size), &layout, |b, layout| {
            b.iter(|| render_svg(black_box(layout), &theme, &render))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10usize, 100, 1000] {
        let input = graph_json(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse_graph(black_box(input)).expect("parse failed"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_render, bench_parse);
criterion_main!(benches);
