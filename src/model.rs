//! Canonical table / column / relationship model built by the pipeline.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(rename = "isPk")]
    pub is_pk: bool,
    #[serde(rename = "isFk")]
    pub is_fk: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    /// Referencing column points at a referenced column.
    Standard,
    /// Both tables are keyed by the same (non-`id`) column name.
    SharedPrimaryKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub source_table: String,
    pub target_table: String,
    pub source_column: String,
    pub target_column: String,
    pub kind: RelationshipKind,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
        }
    }

    /// Case-insensitive column lookup, returning the index into `columns`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// First primary-key column in declaration order.
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_pk)
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key().is_some()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Group key: text before the first `_`, or `other`.
    pub fn group(&self) -> &str {
        match self.name.split_once('_') {
            Some((prefix, _)) => prefix,
            None => "other",
        }
    }

    /// Mark the named column as a foreign key. Returns `false` if no such column exists.
    pub fn mark_foreign_key(&mut self, column: &str) -> bool {
        match self.column_index(column) {
            Some(idx) => {
                self.columns[idx].is_fk = true;
                true
            }
            None => false,
        }
    }
}

impl Column {
    pub fn new(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            is_pk: false,
            is_fk: false,
        }
    }
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::SharedPrimaryKey => "shared-primary-key",
        }
    }
}

impl Relationship {
    pub fn standard(
        source_table: impl Into<String>,
        source_column: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            source_table: source_table.into(),
            target_table: target_table.into(),
            source_column: source_column.into(),
            target_column: target_column.into(),
            kind: RelationshipKind::Standard,
        }
    }

    pub fn shared_primary_key(
        source_table: impl Into<String>,
        target_table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        let column = column.into();
        Self {
            source_table: source_table.into(),
            target_table: target_table.into(),
            source_column: column.clone(),
            target_column: column,
            kind: RelationshipKind::SharedPrimaryKey,
        }
    }

    /// True if this is a `standard` edge from `source_table.source_column` to a
    /// column named `target_column`, whatever the target table.
    pub fn same_reference(&self, source_table: &str, source_column: &str, target_column: &str) -> bool {
        self.kind == RelationshipKind::Standard
            && self.source_table.eq_ignore_ascii_case(source_table)
            && self.source_column.eq_ignore_ascii_case(source_column)
            && self.target_column.eq_ignore_ascii_case(target_column)
    }

    /// True if the relationship has `table` at either end.
    pub fn touches(&self, table: &str) -> bool {
        self.source_table.eq_ignore_ascii_case(table) || self.target_table.eq_ignore_ascii_case(table)
    }

    /// True if the relationship connects `a` and `b` in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source_table.eq_ignore_ascii_case(a) && self.target_table.eq_ignore_ascii_case(b))
            || (self.source_table.eq_ignore_ascii_case(b) && self.target_table.eq_ignore_ascii_case(a))
    }
}
