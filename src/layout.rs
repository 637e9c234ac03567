//! Pluggable node placement for the assembled graph.

mod layered;
mod types;

pub use layered::{assign_ranks, LayeredLayout};
pub use types::{Direction, LayoutAlgorithm, LayoutEdge, LayoutNode};

use crate::ir::GraphIR;
use crate::measure::TextMetrics;
use tracing::debug;

/// Size every node, run `algorithm`, and write the positions back into `ir`.
pub fn apply_layout(ir: &mut GraphIR, algorithm: &dyn LayoutAlgorithm, metrics: &TextMetrics) {
    let nodes: Vec<LayoutNode> = ir
        .nodes
        .iter()
        .map(|n| {
            let (width, height) = metrics.node_size(&n.data.label, &n.data.columns);
            LayoutNode {
                id: n.id.clone(),
                width,
                height,
            }
        })
        .collect();
    let edges: Vec<LayoutEdge> = ir
        .edges
        .iter()
        .map(|e| LayoutEdge {
            source: e.source.clone(),
            target: e.target.clone(),
        })
        .collect();

    let positions = algorithm.layout(&nodes, &edges);
    for (node, position) in ir.nodes.iter_mut().zip(positions) {
        node.position = position;
    }

    debug!(nodes = ir.nodes.len(), edges = ir.edges.len(), "applied layout");
}
