use serde::Deserialize;
use spatial_summary_renderer::layout::compute_layout;
use spatial_summary_renderer::layout_dump::LayoutDump;
use spatial_summary_renderer::{BandGaps, RenderOptions, parse_graph, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    preserve_gaps: Option<bool>,
}

fn build_render_options(options: SummaryRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::summary_default()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.text_font_size = font_size;
    }
    if let Some(width) = options.width {
        render_options = render_options.with_viewport_width(width);
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    if options.preserve_gaps == Some(true) {
        render_options.layout.band_gaps = BandGaps::Preserve;
    }

    render_options
}

fn parse_options(options_json: Option<String>) -> Result<SummaryRenderOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<SummaryRenderOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(SummaryRenderOptions::default()),
    }
}

/// Renders a graph (or an analysis response) to SVG. `width` should be the
/// container width measured after mount.
#[wasm_bindgen]
pub fn render_summary_svg(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let render_options = build_render_options(parse_options(options_json)?);
    render_with_options(graph_json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Returns the computed layout as JSON for hosts that draw nodes themselves.
#[wasm_bindgen]
pub fn layout_summary_json(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = build_render_options(parse_options(options_json)?);
    let graph = parse_graph(graph_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let layout = compute_layout(&graph, &options.theme, &options.layout);
    LayoutDump::from_layout(&layout)
        .to_json()
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
