//! Orthogonal Connectors
//!
//! Parent to child links are drawn as three kinds of straight segments: a
//! drop from the parent's bottom-centre to a midline, a horizontal bus along
//! the midline spanning the children, and a riser up into each child.

use super::{LayoutConfig, LayoutNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Drop,
    Bus,
    Riser,
}

/// One straight connector segment in padded canvas coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSegment {
    /// Stable render key: `vdown-{parent}`, `h-{parent}` or `vup-{child}`
    pub key: String,
    pub kind: ConnectorKind,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl ConnectorSegment {
    /// SVG path data, `M x1 y1 L x2 y2`
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} L {} {}",
            self.start.0, self.start.1, self.end.0, self.end.1
        )
    }
}

/// Segments for every internal node, in pre-order
///
/// A node with `k` children contributes one drop, a bus when `k > 1`, and `k`
/// risers. Each child's riser is followed directly by that child's own
/// segments, before the next sibling's riser.
pub fn collect_edges(root: &LayoutNode, config: &LayoutConfig) -> Vec<ConnectorSegment> {
    let mut segments = Vec::new();
    push_edges(root, config, &mut segments);
    segments
}

fn push_edges(node: &LayoutNode, config: &LayoutConfig, out: &mut Vec<ConnectorSegment>) {
    if node.children.is_empty() {
        return;
    }

    let pad = config.padding;
    let half_card = config.card_width / 2.0;
    let parent_cx = node.x + half_card + pad;
    let parent_bottom = node.y + config.card_height + pad;
    let mid_y = parent_bottom + config.v_gap / 2.0;

    out.push(ConnectorSegment {
        key: format!("vdown-{}", node.id()),
        kind: ConnectorKind::Drop,
        start: (parent_cx, parent_bottom),
        end: (parent_cx, mid_y),
    });

    if let [first, .., last] = node.children.as_slice() {
        out.push(ConnectorSegment {
            key: format!("h-{}", node.id()),
            kind: ConnectorKind::Bus,
            start: (first.x + half_card + pad, mid_y),
            end: (last.x + half_card + pad, mid_y),
        });
    }

    for child in &node.children {
        let child_cx = child.x + half_card + pad;
        out.push(ConnectorSegment {
            key: format!("vup-{}", child.id()),
            kind: ConnectorKind::Riser,
            start: (child_cx, mid_y),
            end: (child_cx, child.y + pad),
        });
        push_edges(child, config, out);
    }
}
