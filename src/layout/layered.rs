//! Rank-based layered placement.

use crate::ir::Position;
use std::collections::HashMap;

use super::types::{Direction, LayoutAlgorithm, LayoutEdge, LayoutNode};

/// Simple layered layout: nodes are ranked along edge direction and stacked
/// within their rank in input order.
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    pub direction: Direction,
    /// Gap between nodes sharing a rank.
    pub node_sep: f64,
    /// Gap between consecutive ranks.
    pub rank_sep: f64,
    pub margin: f64,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            direction: Direction::LeftRight,
            node_sep: 100.0,
            rank_sep: 150.0,
            margin: 50.0,
        }
    }
}

impl LayeredLayout {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }
}

impl LayoutAlgorithm for LayeredLayout {
    fn layout(&self, nodes: &[LayoutNode], edges: &[LayoutEdge]) -> Vec<Position> {
        let ranks = assign_ranks(nodes, edges);
        let rank_count = ranks.iter().copied().max().map_or(0, |m| m + 1);

        // Extent of each rank along the flow axis.
        let mut rank_extent = vec![0.0_f64; rank_count];
        for (node, &rank) in nodes.iter().zip(&ranks) {
            let (along, _) = self.axes(node);
            rank_extent[rank] = rank_extent[rank].max(along);
        }

        let mut rank_offset = Vec::with_capacity(rank_count);
        let mut offset = self.margin;
        for extent in &rank_extent {
            rank_offset.push(offset);
            offset += extent + self.rank_sep;
        }

        let mut cursor = vec![self.margin; rank_count];
        nodes
            .iter()
            .zip(&ranks)
            .map(|(node, &rank)| {
                let (_, across) = self.axes(node);
                let along_pos = rank_offset[rank];
                let across_pos = cursor[rank];
                cursor[rank] += across + self.node_sep;

                match self.direction {
                    Direction::LeftRight => Position {
                        x: along_pos,
                        y: across_pos,
                    },
                    Direction::TopBottom => Position {
                        x: across_pos,
                        y: along_pos,
                    },
                }
            })
            .collect()
    }
}

impl LayeredLayout {
    /// (size along the rank axis, size across it)
    fn axes(&self, node: &LayoutNode) -> (f64, f64) {
        match self.direction {
            Direction::LeftRight => (node.width, node.height),
            Direction::TopBottom => (node.height, node.width),
        }
    }
}

/// Longest-path ranking: a node sits one rank after its deepest predecessor.
/// Nodes caught in cycles go after the deepest acyclic rank. Edge ends match
/// node ids ignoring ASCII case.
pub fn assign_ranks(nodes: &[LayoutNode], edges: &[LayoutEdge]) -> Vec<usize> {
    let index: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.to_ascii_lowercase(), i))
        .collect();

    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for edge in edges {
        let from = index.get(&edge.source.to_ascii_lowercase());
        let to = index.get(&edge.target.to_ascii_lowercase());
        let (Some(&from), Some(&to)) = (from, to) else {
            continue;
        };
        if from != to && !preds[to].contains(&from) {
            preds[to].push(from);
        }
    }

    let mut ranks: Vec<Option<usize>> = preds
        .iter()
        .map(|p| if p.is_empty() { Some(0) } else { None })
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for node in 0..nodes.len() {
            if ranks[node].is_some() {
                continue;
            }
            let parent_ranks: Vec<usize> = preds[node].iter().filter_map(|&p| ranks[p]).collect();
            if parent_ranks.len() == preds[node].len() {
                ranks[node] = parent_ranks.iter().max().map(|m| m + 1);
                changed = true;
            }
        }
    }

    let max_rank = ranks.iter().flatten().copied().max().unwrap_or(0);
    ranks.into_iter().map(|r| r.unwrap_or(max_rank + 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> LayoutNode {
        LayoutNode {
            id: id.to_string(),
            width: 220.0,
            height: 150.0,
        }
    }

    fn edge(source: &str, target: &str) -> LayoutEdge {
        LayoutEdge {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn test_ranks_follow_edges() {
        let nodes = vec![node("order_items"), node("orders"), node("users")];
        let edges = vec![edge("order_items", "orders"), edge("orders", "users")];
        assert_eq!(assign_ranks(&nodes, &edges), vec![0, 1, 2]);
    }

    #[test]
    fn test_ranks_ignore_self_loops_and_unknown_nodes() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![edge("a", "a"), edge("a", "ghost"), edge("a", "b")];
        assert_eq!(assign_ranks(&nodes, &edges), vec![0, 1]);
    }

    #[test]
    fn test_ranks_match_edge_ends_ignoring_case() {
        let nodes = vec![node("orders"), node("users")];
        let edges = vec![edge("ORDERS", "Users")];
        assert_eq!(assign_ranks(&nodes, &edges), vec![0, 1]);
    }

    #[test]
    fn test_cycles_go_last() {
        let nodes = vec![node("root"), node("x"), node("y")];
        let edges = vec![edge("x", "y"), edge("y", "x")];
        assert_eq!(assign_ranks(&nodes, &edges), vec![0, 1, 1]);
    }

    #[test]
    fn test_left_right_positions() {
        let layout = LayeredLayout::default();
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![edge("a", "c"), edge("b", "c")];

        let positions = layout.layout(&nodes, &edges);

        assert_eq!(positions[0], Position { x: 50.0, y: 50.0 });
        assert_eq!(positions[1], Position { x: 50.0, y: 300.0 });
        assert_eq!(positions[2], Position { x: 420.0, y: 50.0 });
    }

    #[test]
    fn test_top_bottom_positions() {
        let layout = LayeredLayout::new(Direction::TopBottom);
        let nodes = vec![node("a"), node("b")];
        let edges = vec![edge("a", "b")];

        let positions = layout.layout(&nodes, &edges);

        assert_eq!(positions[0], Position { x: 50.0, y: 50.0 });
        assert_eq!(positions[1], Position { x: 50.0, y: 350.0 });
    }

    #[test]
    fn test_empty_graph() {
        let layout = LayeredLayout::default();
        assert!(layout.layout(&[], &[]).is_empty());
    }
}
