//! Lookups over an assembled graph.

use crate::ir::{GraphIR, Node};

impl GraphIR {
    /// Nodes whose label or any column name contains `term`, ignoring case.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Node> {
        let term = term.to_lowercase();
        self.nodes
            .iter()
            .filter(|n| {
                n.data.label.to_lowercase().contains(&term)
                    || n.data.columns.iter().any(|c| c.name.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// `id` followed by every node sharing an edge with it, in node order.
    /// Ids compare ignoring ASCII case. Empty if `id` is not a node.
    pub fn neighbors(&self, id: &str) -> Vec<&Node> {
        let Some(selected) = self.node(id) else {
            return vec![];
        };
        let linked = |other: &str| {
            self.edges.iter().any(|e| {
                (e.source.eq_ignore_ascii_case(id) && e.target.eq_ignore_ascii_case(other))
                    || (e.target.eq_ignore_ascii_case(id) && e.source.eq_ignore_ascii_case(other))
            })
        };

        let mut result = vec![selected];
        result.extend(
            self.nodes
                .iter()
                .filter(|n| !n.id.eq_ignore_ascii_case(id) && linked(&n.id)),
        );
        result
    }
}
