//! Tidy Top-Down Layout
//!
//! Places every card of a (projected) tree on a canvas. Each node is centred
//! over the horizontal span of its subtree, siblings are packed left to right,
//! and rows follow either tree depth or grade band.
//!
//! Layout consumes an owned tree (normally the output of
//! [`crate::services::filter::project`]) and moves each card into its
//! [`LayoutNode`], so no node data is copied.

mod connectors;
mod viewport;

pub use connectors::{collect_edges, ConnectorKind, ConnectorSegment};
pub use viewport::{FormPlacement, Point, ScreenRect, Viewport, MAX_SCALE, MIN_SCALE, ZOOM_STEP};

use crate::models::{Grade, PositionNode};
use serde::{Deserialize, Serialize};

/// Card and spacing dimensions, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub card_width: f64,
    pub card_height: f64,
    pub h_gap: f64,
    pub v_gap: f64,
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 200.0,
            card_height: 90.0,
            h_gap: 48.0,
            v_gap: 80.0,
            padding: 60.0,
        }
    }
}

impl LayoutConfig {
    /// Vertical distance between consecutive rows
    pub fn row_pitch(&self) -> f64 {
        self.card_height + self.v_gap
    }
}

/// How rows are assigned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Row = depth in the tree
    #[default]
    Depth,
    /// Row = grade band, G9 at the top; ungraded nodes keep their depth row
    Grade,
}

/// A positioned card and its positioned children
///
/// `x`/`y` are the card's top-left corner, before canvas padding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// The card itself; its own `children` list is always empty here
    #[serde(flatten)]
    pub card: PositionNode,
    pub x: f64,
    pub y: f64,
    pub subtree_width: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn id(&self) -> &str {
        &self.card.id
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Horizontal span reserved for a subtree
///
/// A leaf takes one card width. An internal node takes the wider of its card
/// and its children laid side by side with `h_gap` between them.
pub fn subtree_width(node: &PositionNode, config: &LayoutConfig) -> f64 {
    if node.children.is_empty() {
        return config.card_width;
    }
    let children: f64 = node
        .children
        .iter()
        .map(|child| subtree_width(child, config))
        .sum();
    let gaps = (node.children.len() - 1) as f64 * config.h_gap;
    config.card_width.max(children + gaps)
}

fn row_y(card: &PositionNode, depth: usize, mode: LayoutMode, config: &LayoutConfig) -> f64 {
    let row = match (mode, card.grade) {
        (LayoutMode::Grade, Some(grade)) => grade.band_row(),
        _ => depth,
    };
    row as f64 * config.row_pitch()
}

/// Lay out a subtree whose horizontal span starts at `x_offset`
///
/// Subtree widths are produced bottom-up by the same recursion: children are
/// placed first and their spans summed, then the parent is centred over them.
pub fn build_layout(
    mut node: PositionNode,
    x_offset: f64,
    depth: usize,
    mode: LayoutMode,
    config: &LayoutConfig,
) -> LayoutNode {
    let sources = std::mem::take(&mut node.children);
    let mut children = Vec::with_capacity(sources.len());
    let mut child_x = x_offset;
    for child in sources {
        let laid_out = build_layout(child, child_x, depth + 1, mode, config);
        child_x += laid_out.subtree_width + config.h_gap;
        children.push(laid_out);
    }

    let span = if children.is_empty() {
        config.card_width
    } else {
        let used = child_x - config.h_gap - x_offset;
        config.card_width.max(used)
    };

    LayoutNode {
        x: x_offset + span / 2.0 - config.card_width / 2.0,
        y: row_y(&node, depth, mode, config),
        subtree_width: span,
        card: node,
        children,
    }
}

/// Pre-order list of every positioned card
pub fn flatten(root: &LayoutNode) -> Vec<&LayoutNode> {
    fn visit<'a>(node: &'a LayoutNode, out: &mut Vec<&'a LayoutNode>) {
        out.push(node);
        for child in &node.children {
            visit(child, out);
        }
    }

    let mut out = Vec::new();
    visit(root, &mut out);
    out
}

/// Canvas size, padding included
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasExtent {
    pub width: f64,
    pub height: f64,
}

impl CanvasExtent {
    pub fn of(root: &LayoutNode, mode: LayoutMode, config: &LayoutConfig) -> Self {
        let deepest = flatten(root)
            .iter()
            .map(|node| node.y)
            .fold(0.0_f64, f64::max);
        let last_band = match mode {
            LayoutMode::Grade => (Grade::DESCENDING.len() - 1) as f64 * config.row_pitch(),
            LayoutMode::Depth => 0.0,
        };
        Self {
            width: root.subtree_width + 2.0 * config.padding,
            height: deepest.max(last_band) + config.card_height + 2.0 * config.padding,
        }
    }
}

/// Background stripe for one grade row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBand {
    pub grade: Grade,
    pub y: f64,
    pub height: f64,
    /// True when at least one laid-out card carries this grade
    pub occupied: bool,
}

/// A complete, render-ready chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgLayout {
    pub mode: LayoutMode,
    pub root: LayoutNode,
    pub edges: Vec<ConnectorSegment>,
    pub extent: CanvasExtent,
    #[serde(skip)]
    config: LayoutConfig,
}

impl OrgLayout {
    pub fn compute(tree: PositionNode, mode: LayoutMode, config: &LayoutConfig) -> Self {
        let root = build_layout(tree, 0.0, 0, mode, config);
        let edges = collect_edges(&root, config);
        let extent = CanvasExtent::of(&root, mode, config);
        Self {
            mode,
            root,
            edges,
            extent,
            config: *config,
        }
    }

    pub fn nodes(&self) -> Vec<&LayoutNode> {
        flatten(&self.root)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// One band per grade, G9 first; empty in depth mode
    pub fn grade_bands(&self) -> Vec<GradeBand> {
        if self.mode != LayoutMode::Grade {
            return Vec::new();
        }
        let nodes = self.nodes();
        let pitch = self.config.row_pitch();
        Grade::DESCENDING
            .iter()
            .enumerate()
            .map(|(row, &grade)| GradeBand {
                grade,
                y: row as f64 * pitch + self.config.padding,
                height: pitch,
                occupied: nodes.iter().any(|node| node.card.grade == Some(grade)),
            })
            .collect()
    }
}
