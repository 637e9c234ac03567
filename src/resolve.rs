//! Explicit primary / foreign key constraints.

use crate::ast::{Constraint, Definition, ForeignKeyClause};
use crate::model::{Relationship, Table};
use crate::normalize::PendingTable;
use tracing::{debug, trace};

/// Tables with their explicit keys applied, plus the explicit relationships.
#[derive(Debug, Default)]
pub struct ResolvedSchema {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

/// Apply each table's constraint entries in declaration order.
///
/// Foreign keys are recorded with the raw referenced names; a reference to a
/// table or column that was never declared is kept as is. A clause repeating an
/// already recorded (table, column, referenced column) reference is dropped.
pub fn resolve(pending: Vec<PendingTable<'_>>) -> ResolvedSchema {
    let mut resolved = ResolvedSchema::default();

    for PendingTable {
        mut table,
        constraints,
    } in pending
    {
        for definition in constraints {
            match definition {
                Definition::Constraint(Constraint::PrimaryKey { columns, .. }) => {
                    apply_primary_key(&mut table, columns);
                }
                Definition::Constraint(Constraint::ForeignKey(fk)) | Definition::ForeignKey(fk) => {
                    let Some(rel) = apply_foreign_key(&mut table, fk) else {
                        continue;
                    };
                    let declared = resolved.relationships.iter().any(|r| {
                        r.same_reference(&rel.source_table, &rel.source_column, &rel.target_column)
                    });
                    if declared {
                        trace!(table = %table.name, column = %rel.source_column, "foreign key declared twice");
                    } else {
                        resolved.relationships.push(rel);
                    }
                }
                Definition::Constraint(Constraint::Other { .. }) | Definition::Column(_) => {}
            }
        }
        resolved.tables.push(table);
    }

    debug!(
        tables = resolved.tables.len(),
        relationships = resolved.relationships.len(),
        "resolved explicit constraints"
    );
    resolved
}

fn apply_primary_key(table: &mut Table, columns: &[String]) {
    for name in columns {
        if let Some(idx) = table.column_index(name) {
            table.columns[idx].is_pk = true;
        }
    }
}

fn apply_foreign_key(table: &mut Table, fk: &ForeignKeyClause) -> Option<Relationship> {
    let local = fk.columns.first()?;
    let referred = fk.referred_columns.first()?;

    if !table.mark_foreign_key(local) {
        trace!(table = %table.name, column = %local, "foreign key on undeclared column");
    }

    Some(Relationship::standard(
        table.name.clone(),
        local.clone(),
        fk.foreign_table.name.clone(),
        referred.clone(),
    ))
}
