//! Lowers `sqlparser` statements into the engine's statement tree.

use super::dialect::Dialect;
use crate::ast::{
    ColumnDefinition, Constraint, Definition, ForeignKeyClause, Statement, StatementKind, TableRef,
};
use sqlparser::ast::{self as sp, ColumnOption, ObjectName, TableConstraint};
use sqlparser::parser::{Parser, ParserError};
use thiserror::Error;
use tracing::debug;

/// Referenced column assumed for `REFERENCES table` without a column list.
const DEFAULT_REFERENCED_COLUMN: &str = "id";

#[derive(Debug, Error)]
pub enum SqlParseError {
    #[error("Failed to parse SQL: {0}")]
    Syntax(#[from] ParserError),
}

/// Parse a SQL script into statement nodes.
pub fn parse_sql(input: &str, dialect: Dialect) -> Result<Vec<Statement>, SqlParseError> {
    let dialect = dialect.resolve(input);
    let grammar = dialect.grammar();
    let parsed = Parser::parse_sql(grammar.as_ref(), input)?;

    debug!(
        dialect = dialect.as_str(),
        statements = parsed.len(),
        "parsed SQL script"
    );

    Ok(parsed.iter().map(lower_statement).collect())
}

fn lower_statement(statement: &sp::Statement) -> Statement {
    match statement {
        sp::Statement::CreateTable(create) => Statement {
            kind: StatementKind::CreateTable,
            table: Some(table_ref(&create.name)),
            definitions: lower_table_body(&create.columns, &create.constraints),
        },
        _ => Statement {
            kind: StatementKind::Other,
            table: None,
            definitions: vec![],
        },
    }
}

fn lower_table_body(columns: &[sp::ColumnDef], constraints: &[TableConstraint]) -> Vec<Definition> {
    let mut definitions = Vec::with_capacity(columns.len() + constraints.len());

    for column in columns {
        let mut modifiers = Vec::with_capacity(column.options.len());
        let mut inline_refs = Vec::new();

        for def in &column.options {
            match &def.option {
                ColumnOption::Unique {
                    is_primary: true, ..
                } => modifiers.push("PRIMARY KEY".to_string()),
                ColumnOption::ForeignKey {
                    foreign_table,
                    referred_columns,
                    ..
                } => {
                    modifiers.push(def.option.to_string());
                    let referred = referred_columns
                        .first()
                        .map(|c| c.value.clone())
                        .unwrap_or_else(|| DEFAULT_REFERENCED_COLUMN.to_string());
                    inline_refs.push(ForeignKeyClause {
                        name: def.name.as_ref().map(|n| n.value.clone()),
                        columns: vec![column.name.value.clone()],
                        foreign_table: table_ref(foreign_table),
                        referred_columns: vec![referred],
                    });
                }
                other => modifiers.push(other.to_string()),
            }
        }

        definitions.push(Definition::Column(ColumnDefinition {
            name: column.name.value.clone(),
            data_type: column.data_type.to_string(),
            modifiers,
        }));
        // Inline references follow their column so the column exists when resolved.
        definitions.extend(inline_refs.into_iter().map(Definition::ForeignKey));
    }

    for constraint in constraints {
        definitions.push(lower_constraint(constraint));
    }

    definitions
}

fn lower_constraint(constraint: &TableConstraint) -> Definition {
    match constraint {
        TableConstraint::PrimaryKey { name, columns, .. } => {
            Definition::Constraint(Constraint::PrimaryKey {
                name: name.as_ref().map(|n| n.value.clone()),
                columns: columns.iter().map(|c| c.value.clone()).collect(),
            })
        }
        TableConstraint::ForeignKey {
            name,
            columns,
            foreign_table,
            referred_columns,
            ..
        } => {
            let clause = ForeignKeyClause {
                name: name.as_ref().map(|n| n.value.clone()),
                columns: columns.iter().map(|c| c.value.clone()).collect(),
                foreign_table: table_ref(foreign_table),
                referred_columns: if referred_columns.is_empty() {
                    vec![DEFAULT_REFERENCED_COLUMN.to_string()]
                } else {
                    referred_columns.iter().map(|c| c.value.clone()).collect()
                },
            };
            if clause.name.is_some() {
                Definition::Constraint(Constraint::ForeignKey(clause))
            } else {
                Definition::ForeignKey(clause)
            }
        }
        TableConstraint::Unique { name, .. } | TableConstraint::Check { name, .. } => {
            Definition::Constraint(Constraint::Other {
                name: name.as_ref().map(|n| n.value.clone()),
            })
        }
        _ => Definition::Constraint(Constraint::Other { name: None }),
    }
}

/// `schema.table` keeps the last part as the table name.
fn table_ref(name: &ObjectName) -> TableRef {
    let parts = &name.0;
    match parts.len() {
        0 => TableRef::new(String::new()),
        n => TableRef {
            schema: (n > 1).then(|| parts[n - 2].value.clone()),
            name: parts[n - 1].value.clone(),
        },
    }
}
