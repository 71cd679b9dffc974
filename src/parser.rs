use crate::ir::{Edge, Graph, Node, NodeKind, StyleOverride};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace, warn};

static FENCED_JSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[ \t]*(?:json5?|JSON)?[ \t]*\r?\n(.*?)```").unwrap());
static CSS_LENGTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*(?:px)?\s*$").unwrap());

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is not valid JSON: {0}")]
    Json(String),
    #[error("no analysis result found in input")]
    MissingAnalysis,
    #[error("invalid graph: {0}")]
    Graph(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val as f32),
            NumberOrString::String(val) => CSS_LENGTH_RE
                .captures(val)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f32>().ok()),
        }
    }

    fn into_id(self) -> String {
        match self {
            NumberOrString::Number(val) => format!("{}", val),
            NumberOrString::String(val) => val,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawNodeType {
    Formula,
    Text,
}

impl RawNodeType {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "formula" | "math" => Some(RawNodeType::Formula),
            "text" => Some(RawNodeType::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawStyle {
    color: Option<String>,
    font_size: Option<NumberOrString>,
    max_width: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Option<NumberOrString>,
    x: Option<NumberOrString>,
    y: Option<NumberOrString>,
    #[serde(rename = "type")]
    node_type: Option<String>,
    latex: Option<String>,
    content: Option<String>,
    style: Option<RawStyle>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    source: NumberOrString,
    target: NumberOrString,
}

/// Nodes and edges stay as raw values so one bad entry only costs itself.
#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<Value>,
    #[serde(default)]
    edges: Vec<Value>,
}

/// Parses a graph from JSON text. Accepts a bare graph, the analysis
/// backend's response (`[{"analysis": graph}]` or `{"analysis": graph}`),
/// and either of those wrapped in a fenced code block. JSON5 is accepted as
/// a fallback for hand-edited or model-produced input.
pub fn parse_graph(input: &str) -> Result<Graph, ParseError> {
    let value = parse_value(input)?;
    graph_from_value(value)
}

/// Like [`parse_graph`], but returns every analysis in a multi-document
/// response instead of just the first one.
pub fn parse_graphs(input: &str) -> Result<Vec<Graph>, ParseError> {
    match parse_value(input)? {
        Value::Array(items) => {
            let analyses: Vec<Value> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(mut map) => map.remove("analysis"),
                    _ => None,
                })
                .collect();
            if analyses.is_empty() {
                return Err(ParseError::MissingAnalysis);
            }
            analyses.into_iter().map(graph_from_value).collect()
        }
        value => Ok(vec![graph_from_value(value)?]),
    }
}

pub fn graph_from_value(value: Value) -> Result<Graph, ParseError> {
    let located = locate_graph(value)?;
    let raw: RawGraph = serde_json::from_value(located)?;
    Ok(raw.into_graph())
}

fn parse_value(input: &str) -> Result<Value, ParseError> {
    let body = strip_code_fence(input);
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Ok(value),
        Err(err) => {
            trace!("strict JSON parse failed, retrying as JSON5: {err}");
            json5::from_str::<Value>(body).map_err(|_| ParseError::Json(err.to_string()))
        }
    }
}

fn strip_code_fence(input: &str) -> &str {
    match FENCED_JSON_RE.captures(input).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str(),
        None => input.trim(),
    }
}

fn locate_graph(value: Value) -> Result<Value, ParseError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .find_map(|item| match item {
                Value::Object(mut map) => map.remove("analysis"),
                _ => None,
            })
            .ok_or(ParseError::MissingAnalysis)
            .and_then(locate_graph),
        Value::Object(mut map) => {
            if map.contains_key("nodes") || map.contains_key("edges") {
                return Ok(Value::Object(map));
            }
            match map.remove("analysis") {
                Some(inner) => locate_graph(inner),
                None => Err(ParseError::MissingAnalysis),
            }
        }
        // Some backends return the analysis as a JSON document inside a string.
        Value::String(text) => locate_graph(parse_value(&text)?),
        _ => Err(ParseError::MissingAnalysis),
    }
}

impl RawGraph {
    fn into_graph(self) -> Graph {
        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (idx, value) in self.nodes.into_iter().enumerate() {
            let raw = match serde_json::from_value::<RawNode>(value) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(index = idx, "skipping unreadable node: {err}");
                    continue;
                }
            };
            let Some(node) = raw.into_node(idx) else {
                continue;
            };
            if !seen.insert(node.id.clone()) {
                warn!(id = %node.id, "duplicate node id; edges bind to the first occurrence");
            }
            nodes.push(node);
        }
        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| match serde_json::from_value::<RawEdge>(value) {
                Ok(edge) => Some(Edge {
                    source: edge.source.into_id(),
                    target: edge.target.into_id(),
                }),
                Err(err) => {
                    debug!(index = idx, "skipping unreadable edge: {err}");
                    None
                }
            })
            .collect();
        Graph { nodes, edges }
    }
}

fn coordinate(raw: Option<&NumberOrString>, id: &str, axis: &str) -> f32 {
    match raw {
        None => 0.0,
        Some(value) => value.as_f32().unwrap_or_else(|| {
            warn!(id = %id, axis, "coordinate is not a number; using 0");
            0.0
        }),
    }
}

impl RawNode {
    fn into_node(self, idx: usize) -> Option<Node> {
        let Some(id) = self.id.map(NumberOrString::into_id) else {
            warn!(index = idx, "skipping node without an id");
            return None;
        };
        let node_type = match self.node_type.as_deref() {
            Some(name) => RawNodeType::from_name(name).unwrap_or_else(|| {
                warn!(id = %id, node_type = name, "unknown node type; rendering as text");
                RawNodeType::Text
            }),
            None => {
                warn!(id = %id, "node without a type; rendering as text");
                RawNodeType::Text
            }
        };
        let kind = match node_type {
            RawNodeType::Formula => NodeKind::Formula {
                latex: self.latex.unwrap_or_else(|| {
                    debug!(id = %id, "formula node without latex; rendering empty");
                    String::new()
                }),
            },
            RawNodeType::Text => NodeKind::Text {
                content: self.content.or(self.latex).unwrap_or_else(|| {
                    debug!(id = %id, "text node without content; rendering empty");
                    String::new()
                }),
            },
        };
        let style = self.style.map(RawStyle::into_override).filter(|style| !style.is_empty());
        Some(Node {
            x: coordinate(self.x.as_ref(), &id, "x"),
            y: coordinate(self.y.as_ref(), &id, "y"),
            id,
            kind,
            style,
        })
    }
}

impl RawStyle {
    fn into_override(self) -> StyleOverride {
        let font_size = self.font_size.as_ref().and_then(NumberOrString::as_f32);
        let max_width = self.max_width.as_ref().and_then(NumberOrString::as_f32);
        if self.max_width.is_some() && max_width.is_none() {
            debug!("ignoring maxWidth that is not a pixel length");
        }
        StyleOverride {
            color: self.color,
            font_size,
            max_width,
        }
    }
}
