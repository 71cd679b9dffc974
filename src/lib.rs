#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{BandGaps, Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Edge, Graph, Node, NodeKind, StyleOverride};
pub use layout::{Layout, compute_layout};
pub use parser::{ParseError, parse_graph};
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to turn a graph into an SVG in one call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn summary_default() -> Self {
        Self::from_theme(Theme::summary_default())
    }

    pub fn modern() -> Self {
        Self::from_theme(Theme::modern())
    }

    fn from_theme(theme: Theme) -> Self {
        let render = RenderConfig {
            background: theme.background.clone(),
            ..RenderConfig::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }

    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.layout.viewport_width = width;
        self.render.width = width;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::summary_default()
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
        }
    }
}

/// Parses `input` (a graph or an analysis response), lays it out and
/// renders it to SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let graph = parse_graph(input)?;
    let layout = compute_layout(&graph, &options.theme, &options.layout);
    Ok(render_svg(&layout, &options.theme, &options.render))
}

pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_options(input, RenderOptions::default())
}
