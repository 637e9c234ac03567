//! Data structures crossing the layout boundary.

use crate::ir::Position;

/// A node to be placed, with its estimated size.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

/// Directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

/// Flow direction of ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ranks run left to right.
    #[default]
    LeftRight,
    /// Ranks run top to bottom.
    TopBottom,
}

impl Direction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LR" => Some(Self::LeftRight),
            "TB" => Some(Self::TopBottom),
            _ => None,
        }
    }
}

/// A graph-drawing algorithm: sized nodes and directed edges in, one top-left
/// position per node out (same order as `nodes`).
pub trait LayoutAlgorithm {
    fn layout(&self, nodes: &[LayoutNode], edges: &[LayoutEdge]) -> Vec<Position>;
}
