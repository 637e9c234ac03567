//! Graph assembly: tables and relationships to generic nodes and edges.

use crate::model::{Column, Relationship, RelationshipKind, Table};
use crate::serializer::serialize_table;
use serde::Serialize;

/// Edge label used for shared-primary-key relationships.
pub const SHARED_KEY_LABEL: &str = "Shared PK";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphIR {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    /// Top-left corner; the origin until a layout is applied.
    pub position: Position,
    pub data: NodeData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub label: String,
    pub columns: Vec<Column>,
    pub group: String,
    pub sql: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub data: EdgeData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeData {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

impl GraphIR {
    pub fn from_schema(tables: &[Table], relationships: &[Relationship]) -> Self {
        let nodes = tables.iter().map(Node::from_table).collect();
        let edges = relationships
            .iter()
            .enumerate()
            .map(|(i, r)| Edge::from_relationship(i, r))
            .collect();

        GraphIR { nodes, edges }
    }

    /// Node lookup ignoring ASCII case, like every table-name comparison.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.eq_ignore_ascii_case(id))
    }
}

impl Node {
    fn from_table(table: &Table) -> Self {
        Node {
            id: table.name.clone(),
            position: Position::default(),
            data: NodeData {
                label: table.name.clone(),
                columns: table.columns.clone(),
                group: table.group().to_string(),
                sql: serialize_table(table),
            },
        }
    }
}

impl Edge {
    fn from_relationship(index: usize, rel: &Relationship) -> Self {
        let label = match rel.kind {
            RelationshipKind::Standard => format!("{} -> {}", rel.source_column, rel.target_column),
            RelationshipKind::SharedPrimaryKey => SHARED_KEY_LABEL.to_string(),
        };

        Edge {
            id: format!("e{}-{}-{}", index, rel.source_table, rel.target_table),
            source: rel.source_table.clone(),
            target: rel.target_table.clone(),
            label,
            data: EdgeData { kind: rel.kind },
        }
    }
}
