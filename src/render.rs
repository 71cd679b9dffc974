use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{DisplayKind, FontStyle, FontWeight, Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Writes the layout as a standalone SVG document. Connectors are drawn
/// first so node boxes sit on top of them. Formulas are emitted verbatim
/// with a `math` class and a `data-latex` attribute for a downstream
/// typesetter to pick up.
pub fn render_svg(layout: &Layout, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    let width = if layout.width > 0.0 {
        layout.width
    } else {
        config.width
    };
    let height = layout.height.max(config.height);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&config.background)
    ));

    svg.push_str("<g class=\"edges\">");
    for edge in &layout.edges {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" data-source=\"{}\" data-target=\"{}\"/>",
            edge.curve.to_svg_path(),
            escape_xml(&theme.line_color),
            theme.line_width,
            escape_xml(&edge.source),
            escape_xml(&edge.target)
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &layout.nodes {
        svg.push_str(&node_svg(node));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn node_svg(node: &NodeLayout) -> String {
    let style = &node.style;
    let mut out = format!("<g class=\"node\" data-id=\"{}\">", escape_xml(&node.id));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" ry=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        node.x - node.width / 2.0,
        node.y - node.height / 2.0,
        node.width,
        node.height,
        style.corner_radius,
        style.corner_radius,
        escape_xml(&style.background),
        escape_xml(&style.border_color),
        style.border_width
    ));

    if node.label.lines.is_empty() {
        out.push_str("</g>");
        return out;
    }

    let line_height = node.label.height / node.label.lines.len() as f32;
    let start_y = node.y - node.label.height / 2.0 + line_height / 2.0;

    let weight = match style.font_weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    };
    let font_style = match style.font_style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
    };
    let math_attrs = match node.classification.display_kind {
        DisplayKind::Formula => format!(
            " class=\"math\" data-latex=\"{}\"",
            escape_xml(node.kind.payload())
        ),
        DisplayKind::Text => String::new(),
    };

    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" font-style=\"{font_style}\" fill=\"{}\"{math_attrs}>",
        node.x,
        escape_xml(&style.font_family),
        style.font_size,
        escape_xml(&style.color),
    ));
    for (idx, line) in node.label.lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        out.push_str(&format!(
            "<tspan x=\"{:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            node.x,
            escape_xml(line)
        ));
    }
    out.push_str("</text></g>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('"').to_string();
    }
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("invalid canvas size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

/// Lays out and renders in one step.
pub fn render_graph_svg(
    graph: &crate::ir::Graph,
    theme: &Theme,
    layout_config: &LayoutConfig,
    render_config: &RenderConfig,
) -> String {
    let layout = crate::layout::compute_layout(graph, theme, layout_config);
    render_svg(&layout, theme, render_config)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
