//! Statement tree to canonical tables.

use crate::ast::{Definition, Statement, StatementKind};
use crate::model::{Column, Table};
use tracing::trace;

const PRIMARY_KEY_MARKER: &str = "primary key";

/// A freshly normalized table together with the constraint entries its
/// statement declared, still waiting for resolution.
#[derive(Debug)]
pub struct PendingTable<'a> {
    pub table: Table,
    pub constraints: Vec<&'a Definition>,
}

/// Build one table per `CREATE TABLE` statement, in statement order.
/// Every other statement kind is skipped.
pub fn normalize(statements: &[Statement]) -> Vec<PendingTable<'_>> {
    let mut tables = Vec::new();

    for statement in statements {
        if statement.kind != StatementKind::CreateTable {
            continue;
        }
        let Some(table_ref) = &statement.table else {
            trace!("CREATE TABLE without a target table, skipped");
            continue;
        };

        let mut table = Table::new(table_ref.name.clone());
        let mut constraints = Vec::new();

        for definition in &statement.definitions {
            match definition {
                Definition::Column(def) => {
                    let is_pk = def
                        .modifiers
                        .iter()
                        .any(|m| m.trim().eq_ignore_ascii_case(PRIMARY_KEY_MARKER));
                    table.columns.push(Column {
                        is_pk,
                        ..Column::new(def.name.clone(), def.data_type.clone())
                    });
                }
                other => constraints.push(other),
            }
        }

        trace!(table = %table.name, columns = table.columns.len(), "normalized table");
        tables.push(PendingTable { table, constraints });
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnDefinition, Constraint, ForeignKeyClause};

    #[test]
    fn test_only_create_table_is_normalized() {
        let statements = vec![
            Statement {
                kind: StatementKind::Other,
                table: None,
                definitions: vec![],
            },
            Statement::create_table(
                "users",
                vec![Definition::Column(
                    ColumnDefinition::new("id", "INT").with_modifier("PRIMARY KEY"),
                )],
            ),
        ];

        let tables = normalize(&statements);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table.name, "users");
        assert!(tables[0].table.columns[0].is_pk);
        assert!(!tables[0].table.columns[0].is_fk);
    }

    #[test]
    fn test_statement_and_column_order_preserved() {
        let statements = vec![
            Statement::create_table(
                "b",
                vec![
                    Definition::Column(ColumnDefinition::new("z", "INT")),
                    Definition::Column(ColumnDefinition::new("a", "TEXT")),
                ],
            ),
            Statement::create_table("a", vec![]),
        ];

        let tables = normalize(&statements);
        let names: Vec<&str> = tables.iter().map(|t| t.table.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let cols: Vec<&str> = tables[0].table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cols, vec!["z", "a"]);
        assert_eq!(tables[0].table.columns[1].typ, "TEXT");
    }

    #[test]
    fn test_primary_key_marker_is_case_insensitive() {
        let statements = vec![Statement::create_table(
            "t",
            vec![
                Definition::Column(ColumnDefinition::new("a", "INT").with_modifier("primary key")),
                Definition::Column(ColumnDefinition::new("b", "INT").with_modifier("NOT NULL")),
            ],
        )];

        let tables = normalize(&statements);
        assert!(tables[0].table.columns[0].is_pk);
        assert!(!tables[0].table.columns[1].is_pk);
    }

    #[test]
    fn test_constraints_are_held_for_resolution() {
        let statements = vec![Statement::create_table(
            "orders",
            vec![
                Definition::Column(ColumnDefinition::new("user_id", "INT")),
                Definition::Constraint(Constraint::PrimaryKey {
                    name: None,
                    columns: vec!["user_id".into()],
                }),
                Definition::ForeignKey(ForeignKeyClause::new("user_id", "users", "id")),
            ],
        )];

        let tables = normalize(&statements);
        assert_eq!(tables[0].constraints.len(), 2);
        // Table-level keys are not applied yet.
        assert!(!tables[0].table.columns[0].is_pk);
    }
}
