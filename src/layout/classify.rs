use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{Node, NodeKind, StyleOverride};
use crate::theme::Theme;

use super::{Classification, DisplayKind, Emphasis, FontStyle, FontWeight, NodeStyle};

// Checked in order; the first keyword found in the text decides.
static TEXT_EMPHASIS_RULES: Lazy<Vec<(Regex, Emphasis)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)theorem").unwrap(), Emphasis::Strong),
        (Regex::new(r"(?i)proof").unwrap(), Emphasis::Emphasized),
    ]
});

pub fn classify(node: &Node) -> Classification {
    match &node.kind {
        NodeKind::Formula { .. } => Classification {
            display_kind: DisplayKind::Formula,
            emphasis: Emphasis::Math,
        },
        NodeKind::Text { content } => Classification {
            display_kind: DisplayKind::Text,
            emphasis: text_emphasis(content),
        },
    }
}

/// Keyword heuristic over plain text; "theorem" anywhere beats "proof".
pub fn text_emphasis(content: &str) -> Emphasis {
    TEXT_EMPHASIS_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(content))
        .map(|(_, emphasis)| *emphasis)
        .unwrap_or(Emphasis::Plain)
}

pub fn default_style(classification: Classification, theme: &Theme) -> NodeStyle {
    let font_size = match classification.emphasis {
        Emphasis::Math => theme.formula_font_size,
        Emphasis::Plain => theme.text_font_size,
        Emphasis::Strong => theme.strong_font_size,
        Emphasis::Emphasized => theme.emphasized_font_size,
    };
    let font_family = match classification.display_kind {
        DisplayKind::Formula => theme.math_font_family.clone(),
        DisplayKind::Text => theme.font_family.clone(),
    };
    NodeStyle {
        color: theme.text_color.clone(),
        font_size,
        max_width: theme.node_max_width,
        font_family,
        font_weight: if classification.emphasis == Emphasis::Strong {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        },
        font_style: if classification.emphasis == Emphasis::Emphasized {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        },
        background: theme.node_background.clone(),
        border_color: theme.node_border.clone(),
        border_width: theme.node_border_width,
        padding: theme.node_padding,
        corner_radius: theme.node_corner_radius,
    }
}

impl StyleOverride {
    /// Overwrites each field of `style` this override sets. A `font_size` or
    /// `max_width` that is zero, negative or non-finite is ignored and the
    /// default stays.
    pub fn apply_to(&self, style: &mut NodeStyle) {
        if let Some(color) = &self.color {
            style.color = color.clone();
        }
        if let Some(font_size) = self.font_size {
            if font_size.is_finite() && font_size > 0.0 {
                style.font_size = font_size;
            } else {
                tracing::debug!(font_size, "ignoring non-positive font size override");
            }
        }
        if let Some(max_width) = self.max_width {
            if max_width.is_finite() && max_width > 0.0 {
                style.max_width = max_width;
            } else {
                tracing::debug!(max_width, "ignoring non-positive max width override");
            }
        }
    }
}

/// Theme defaults for the node's classification, then the node's own
/// overrides on top.
pub fn resolve_style(node: &Node, classification: Classification, theme: &Theme) -> NodeStyle {
    let mut style = default_style(classification, theme);
    if let Some(overrides) = &node.style {
        overrides.apply_to(&mut style);
    }
    style
}
