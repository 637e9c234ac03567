//! Serializer for reconstructing canonical DDL from the table model.

use crate::model::{Column, Table};

/// Serialize every table, separated by blank lines.
pub fn serialize(tables: &[Table]) -> String {
    let mut output = String::new();

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&serialize_table(table));
        output.push('\n');
    }

    output
}

/// Canonical `CREATE TABLE` statement for one table.
///
/// Columns keep their order; key columns are annotated with `PRIMARY KEY`
/// and `/* FK */`.
pub fn serialize_table(table: &Table) -> String {
    let body: Vec<String> = table.columns.iter().map(serialize_column).collect();
    format!("CREATE TABLE {} (\n{}\n);", table.name, body.join(",\n"))
}

fn serialize_column(column: &Column) -> String {
    let mut line = format!("  {} {}", column.name, column.typ);
    if column.is_pk {
        line.push_str(" PRIMARY KEY");
    }
    if column.is_fk {
        line.push_str(" /* FK */");
    }
    line
}
