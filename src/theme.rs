use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub math_font_family: String,
    /// Base size for formula nodes.
    pub formula_font_size: f32,
    /// Base size for plain text nodes.
    pub text_font_size: f32,
    pub strong_font_size: f32,
    pub emphasized_font_size: f32,
    pub text_color: String,
    pub node_background: String,
    pub node_border: String,
    pub node_border_width: f32,
    pub node_padding: f32,
    pub node_corner_radius: f32,
    pub node_max_width: f32,
    pub line_color: String,
    pub line_width: f32,
    pub background: String,
}

impl Theme {
    /// Light grey canvas with white boxes and thin grey connectors.
    pub fn summary_default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            math_font_family: "KaTeX_Main, \"Times New Roman\", serif".to_string(),
            formula_font_size: 16.0,
            text_font_size: 14.0,
            strong_font_size: 18.0,
            emphasized_font_size: 16.0,
            text_color: "#000000".to_string(),
            node_background: "#FFFFFF".to_string(),
            node_border: "#CCCCCC".to_string(),
            node_border_width: 1.0,
            node_padding: 5.0,
            node_corner_radius: 4.0,
            node_max_width: 200.0,
            line_color: "#999999".to_string(),
            line_width: 1.0,
            background: "#F0F0F0".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            math_font_family: "KaTeX_Main, \"Latin Modern Math\", serif".to_string(),
            formula_font_size: 15.0,
            text_font_size: 13.0,
            strong_font_size: 16.0,
            emphasized_font_size: 14.0,
            text_color: "#1C2430".to_string(),
            node_background: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            node_border_width: 1.2,
            node_padding: 8.0,
            node_corner_radius: 8.0,
            node_max_width: 220.0,
            line_color: "#7A8AA6".to_string(),
            line_width: 1.4,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "default" | "base" | "summary" => Some(Self::summary_default()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::summary_default()
    }
}
