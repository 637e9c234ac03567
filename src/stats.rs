//! Aggregate schema statistics and health checks.

use crate::model::{Relationship, Table};
use serde::Serialize;

/// Tunables for the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    /// How many tables `most_connected_tables` keeps.
    pub top_connected: usize,
    /// Tables with more columns than this get an info issue.
    pub wide_table_columns: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_connected: 5,
            wide_table_columns: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaStats {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
    pub avg_columns_per_table: f64,
    pub most_connected_tables: Vec<TableConnections>,
    pub groups: Vec<GroupCount>,
    pub potential_issues: Vec<Issue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableConnections {
    pub name: String,
    pub connections: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
}

impl SchemaStats {
    pub fn compute(tables: &[Table], relationships: &[Relationship], options: &StatsOptions) -> Self {
        let table_count = tables.len();
        let column_count: usize = tables.iter().map(|t| t.columns.len()).sum();

        Self {
            table_count,
            column_count,
            relationship_count: relationships.len(),
            avg_columns_per_table: average(column_count, table_count),
            most_connected_tables: most_connected(tables, relationships, options.top_connected),
            groups: group_counts(tables),
            potential_issues: issues(tables, options.wide_table_columns),
        }
    }
}

/// Mean rounded to one decimal place, `0` for no tables.
fn average(columns: usize, tables: usize) -> f64 {
    if tables == 0 {
        return 0.0;
    }
    (columns as f64 / tables as f64 * 10.0).round() / 10.0
}

fn most_connected(tables: &[Table], relationships: &[Relationship], limit: usize) -> Vec<TableConnections> {
    let mut ranked: Vec<TableConnections> = tables
        .iter()
        .map(|t| TableConnections {
            name: t.name.clone(),
            connections: relationships.iter().filter(|r| r.touches(&t.name)).count(),
        })
        .collect();

    // Stable: ties keep table order.
    ranked.sort_by(|a, b| b.connections.cmp(&a.connections));
    ranked.truncate(limit);
    ranked
}

fn group_counts(tables: &[Table]) -> Vec<GroupCount> {
    let mut groups: Vec<GroupCount> = Vec::new();

    for table in tables {
        let key = table.group();
        match groups.iter_mut().find(|g| g.name == key) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount {
                name: key.to_string(),
                count: 1,
            }),
        }
    }

    groups
}

fn issues(tables: &[Table], wide_threshold: usize) -> Vec<Issue> {
    let mut issues = Vec::new();

    for table in tables {
        if !table.has_primary_key() {
            issues.push(Issue {
                kind: IssueKind::Warning,
                message: format!("Table \"{}\" has no Primary Key.", table.name),
            });
        }
        if table.columns.len() > wide_threshold {
            issues.push(Issue {
                kind: IssueKind::Info,
                message: format!("Table \"{}\" has over {} columns.", table.name, wide_threshold),
            });
        }
    }

    issues
}
