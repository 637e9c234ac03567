//! Parser-neutral statement tree consumed by the extraction pipeline.
//!
//! Any SQL front end can drive the engine as long as it lowers its output into
//! these nodes. The `sql` module does this for `sqlparser`.

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Target table of the statement, if it has one.
    pub table: Option<TableRef>,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    CreateTable,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }
}

/// One entry of a `CREATE TABLE` body, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Column(ColumnDefinition),
    Constraint(Constraint),
    /// Unnamed `FOREIGN KEY` clause, or an inline `REFERENCES` lowered by the adapter.
    ForeignKey(ForeignKeyClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
    /// Raw option markers such as `NOT NULL` or `PRIMARY KEY`.
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    PrimaryKey {
        name: Option<String>,
        columns: Vec<String>,
    },
    ForeignKey(ForeignKeyClause),
    /// UNIQUE, CHECK, INDEX and friends. Carried for completeness, never resolved.
    Other { name: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyClause {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub foreign_table: TableRef,
    pub referred_columns: Vec<String>,
}

impl Statement {
    pub fn create_table(name: impl Into<String>, definitions: Vec<Definition>) -> Self {
        Self {
            kind: StatementKind::CreateTable,
            table: Some(TableRef::new(name)),
            definitions,
        }
    }
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            modifiers: vec![],
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }
}

impl ForeignKeyClause {
    pub fn new(column: impl Into<String>, table: impl Into<String>, referred: impl Into<String>) -> Self {
        Self {
            name: None,
            columns: vec![column.into()],
            foreign_table: TableRef::new(table),
            referred_columns: vec![referred.into()],
        }
    }
}
