use std::collections::HashMap;

use crate::ir::Edge;

use super::{CurveDescriptor, EdgeLayout, PlacedNode, Point};

/// Display positions by node id. When ids repeat, the first node wins.
pub struct NodeIndex<'a> {
    positions: HashMap<&'a str, Point>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(placed: &'a [PlacedNode]) -> Self {
        let mut ordered: Vec<&PlacedNode> = placed.iter().collect();
        ordered.sort_by_key(|node| node.index);
        let mut positions = HashMap::with_capacity(ordered.len());
        for node in ordered {
            positions.entry(node.id.as_str()).or_insert(node.position);
        }
        Self { positions }
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Curve between the two endpoints of `edge`, bent through their midpoint.
/// `None` when either endpoint is not in the index.
pub fn resolve_edge(edge: &Edge, index: &NodeIndex<'_>) -> Option<CurveDescriptor> {
    let from = index.get(&edge.source)?;
    let to = index.get(&edge.target)?;
    Some(CurveDescriptor {
        from,
        to,
        control: from.midpoint(to),
    })
}

pub(super) fn resolve_edges(edges: &[Edge], index: &NodeIndex<'_>) -> Vec<EdgeLayout> {
    let mut resolved = Vec::with_capacity(edges.len());
    for edge in edges {
        match resolve_edge(edge, index) {
            Some(curve) => resolved.push(EdgeLayout {
                source: edge.source.clone(),
                target: edge.target.clone(),
                curve,
            }),
            None => tracing::debug!(
                source = %edge.source,
                target = %edge.target,
                "dropping edge with unknown endpoint"
            ),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: &str, index: usize, x: f32, y: f32) -> PlacedNode {
        PlacedNode {
            id: id.to_string(),
            index,
            level: 0,
            band: 0,
            position: Point::new(x, y),
        }
    }

    fn edge(source: &str, target: &str) -> Edge {
        Edge {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn control_point_is_midpoint() {
        let nodes = vec![placed("A", 0, 150.0, 50.0), placed("B", 1, 100.0, 150.0)];
        let index = NodeIndex::new(&nodes);
        let curve = resolve_edge(&edge("A", "B"), &index).unwrap();
        assert_eq!(curve.from, Point::new(150.0, 50.0));
        assert_eq!(curve.to, Point::new(100.0, 150.0));
        assert_eq!(curve.control, Point::new(125.0, 100.0));
        assert_eq!(curve.to_svg_path(), "M150,50 Q125,100 100,150");
    }

    #[test]
    fn unknown_endpoints_resolve_to_none() {
        let nodes = vec![placed("A", 0, 1.0, 1.0)];
        let index = NodeIndex::new(&nodes);
        assert!(resolve_edge(&edge("A", "missing"), &index).is_none());
        assert!(resolve_edge(&edge("missing", "A"), &index).is_none());
        let edges = vec![edge("A", "missing"), edge("A", "A")];
        let resolved = resolve_edges(&edges, &index);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].target, "A");
    }

    #[test]
    fn self_loop_is_degenerate() {
        let nodes = vec![placed("A", 0, 10.0, 20.0)];
        let index = NodeIndex::new(&nodes);
        let curve = resolve_edge(&edge("A", "A"), &index).unwrap();
        assert_eq!(curve.from, curve.to);
        assert_eq!(curve.control, curve.from);
    }

    #[test]
    fn duplicate_ids_bind_to_first_input_node() {
        // Level assignment may emit the later duplicate first.
        let nodes = vec![placed("A", 3, 99.0, 50.0), placed("A", 1, 10.0, 150.0)];
        let index = NodeIndex::new(&nodes);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("A"), Some(Point::new(10.0, 150.0)));
    }
}
