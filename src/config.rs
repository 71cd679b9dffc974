use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How empty levels between occupied ones are drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BandGaps {
    /// Occupied levels are renumbered 0, 1, 2, ... so gaps leave no empty row.
    #[default]
    Compact,
    /// Each level keeps its literal row, so gaps show up as empty rows.
    Preserve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Added to a raw y before quantizing it into a level.
    pub band_offset: f32,
    /// Height of one level, both when quantizing and when placing rows.
    pub band_height: f32,
    /// Width of the display surface nodes are spread across.
    pub viewport_width: f32,
    pub band_gaps: BandGaps,
    pub label_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            band_offset: 330.0,
            band_height: 100.0,
            viewport_width: 1200.0,
            band_gaps: BandGaps::Compact,
            label_line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            background: "#F0F0F0".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::summary_default();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

impl Config {
    /// Sets the measured viewport width for both layout and output canvas.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.layout.viewport_width = width;
        self.render.width = width;
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    math_font_family: Option<String>,
    formula_font_size: Option<f32>,
    text_font_size: Option<f32>,
    strong_font_size: Option<f32>,
    emphasized_font_size: Option<f32>,
    text_color: Option<String>,
    node_background: Option<String>,
    node_border: Option<String>,
    node_border_width: Option<f32>,
    node_padding: Option<f32>,
    node_corner_radius: Option<f32>,
    node_max_width: Option<f32>,
    line_color: Option<String>,
    line_width: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    band_offset: Option<f32>,
    band_height: Option<f32>,
    viewport_width: Option<f32>,
    band_gaps: Option<BandGaps>,
    label_line_height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    height: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Applies a JSON (or JSON5) config document over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {err}"))?,
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => {
                config.render.background = theme.background.clone();
                config.theme = theme;
            }
            None => tracing::warn!(theme = theme_name, "unknown theme; keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.math_font_family {
            theme.math_font_family = v;
        }
        if let Some(v) = vars.formula_font_size {
            theme.formula_font_size = v;
        }
        if let Some(v) = vars.text_font_size {
            theme.text_font_size = v;
        }
        if let Some(v) = vars.strong_font_size {
            theme.strong_font_size = v;
        }
        if let Some(v) = vars.emphasized_font_size {
            theme.emphasized_font_size = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_color = v;
        }
        if let Some(v) = vars.node_background {
            theme.node_background = v;
        }
        if let Some(v) = vars.node_border {
            theme.node_border = v;
        }
        if let Some(v) = vars.node_border_width {
            theme.node_border_width = v;
        }
        if let Some(v) = vars.node_padding {
            theme.node_padding = v;
        }
        if let Some(v) = vars.node_corner_radius {
            theme.node_corner_radius = v;
        }
        if let Some(v) = vars.node_max_width {
            theme.node_max_width = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.line_width {
            theme.line_width = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.band_offset {
            config.layout.band_offset = v;
        }
        if let Some(v) = layout.band_height {
            config.layout.band_height = v;
        }
        if let Some(v) = layout.viewport_width {
            config.set_viewport_width(v);
        }
        if let Some(v) = layout.band_gaps {
            config.layout.band_gaps = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_summary_layout() {
        let config = Config::default();
        assert_eq!(config.layout.band_offset, 330.0);
        assert_eq!(config.layout.band_height, 100.0);
        assert_eq!(config.layout.band_gaps, BandGaps::Compact);
        assert_eq!(config.render.background, config.theme.background);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.viewport_width, 1200.0);
    }

    #[test]
    fn applies_overrides() {
        let config = parse_config(
            r##"{
                "theme": "modern",
                "themeVariables": {"lineColor": "#123456", "textFontSize": 12, "nodePadding": 3},
                "layout": {"bandHeight": 80, "viewportWidth": 640, "bandGaps": "preserve"},
                "render": {"height": 420}
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.font_family, Theme::modern().font_family);
        assert_eq!(config.theme.line_color, "#123456");
        assert_eq!(config.theme.text_font_size, 12.0);
        assert_eq!(config.theme.node_padding, 3.0);
        assert_eq!(config.layout.band_height, 80.0);
        assert_eq!(config.layout.viewport_width, 640.0);
        assert_eq!(config.render.width, 640.0);
        assert_eq!(config.layout.band_gaps, BandGaps::Preserve);
        assert_eq!(config.render.height, 420.0);
    }

    #[test]
    fn accepts_json5() {
        let config = parse_config("{ layout: { bandOffset: 0, }, }").unwrap();
        assert_eq!(config.layout.band_offset, 0.0);
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(parse_config("{ layout: ").is_err());
    }
}
