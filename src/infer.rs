//! Heuristic relationship inference from naming conventions.
//!
//! Two rules run over every (table, column) pair against every other table's
//! primary key:
//!
//! - **naming**: a column called `{table}_id`, `{table}id` or `{table}`
//!   references that table's primary key. Only when no table matches a
//!   column literally are the same patterns tried on singular table names,
//!   so `user_id` points at `users` unless a table `user` exists.
//! - **shared primary key**: two tables keyed by the same column name are
//!   linked one-to-one. The generic name `id` never counts.
//!
//! Matching is purely lexical and case-insensitive. A table is never matched
//! against itself.

use crate::model::{Relationship, Table};
use inflector::Inflector;
use tracing::{debug, trace};

/// Primary-key name excluded from shared-key matching.
const GENERIC_KEY: &str = "id";

/// One designated primary-key column per table, keyed by lower-cased table name.
#[derive(Debug, Clone, Default)]
pub struct PrimaryKeyIndex {
    entries: Vec<PrimaryKeyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyEntry {
    /// Lower-cased table name.
    pub key: String,
    /// Table name as declared.
    pub table: String,
    /// First primary-key column in column order.
    pub column: String,
    patterns: Vec<String>,
    singular_patterns: Vec<String>,
}

impl PrimaryKeyIndex {
    /// Index every table that has at least one primary-key column.
    ///
    /// Tables whose names collide case-insensitively share one entry: it keeps
    /// its first position and first declared name, and takes the last key column.
    pub fn build(tables: &[Table]) -> Self {
        let mut entries: Vec<PrimaryKeyEntry> = Vec::new();

        for table in tables {
            let Some(pk) = table.primary_key() else {
                continue;
            };
            let key = table.name.to_lowercase();
            match entries.iter_mut().find(|e| e.key == key) {
                Some(entry) => entry.column = pk.name.clone(),
                None => entries.push(PrimaryKeyEntry::new(&table.name, &pk.name)),
            }
        }

        Self { entries }
    }

    pub fn get(&self, table: &str) -> Option<&PrimaryKeyEntry> {
        let key = table.to_lowercase();
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrimaryKeyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PrimaryKeyEntry {
    pub fn new(table: &str, column: &str) -> Self {
        let key = table.to_lowercase();
        let patterns = column_patterns(&key);
        let singular_patterns = singular_stem(&key)
            .map(|stem| column_patterns(&stem))
            .unwrap_or_default();
        Self {
            key,
            table: table.to_string(),
            column: column.to_string(),
            patterns,
            singular_patterns,
        }
    }

    /// Implicit foreign-key column names pointing at this table.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Fallback names built from the singular table name. Empty when the name
    /// has no usable singular form.
    pub fn singular_patterns(&self) -> &[String] {
        &self.singular_patterns
    }

    fn matches_column(&self, lowered_column: &str) -> bool {
        self.patterns.iter().any(|p| p == lowered_column)
    }

    fn matches_singular(&self, lowered_column: &str) -> bool {
        self.singular_patterns.iter().any(|p| p == lowered_column)
    }
}

fn column_patterns(stem: &str) -> Vec<String> {
    vec![format!("{stem}_id"), format!("{stem}id"), stem.to_string()]
}

/// Singular form of a lower-cased table name.
///
/// Only the trailing identifier segment is inflected so `shop-orders` becomes
/// `shop-order`. `None` if the name does not change, or if the result is the
/// generic key or a segment shorter than two characters.
fn singular_stem(key: &str) -> Option<String> {
    let prefix_len = key
        .trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '_')
        .len();
    let (prefix, word) = key.split_at(prefix_len);
    if word.is_empty() {
        return None;
    }

    let singular = word.to_singular();
    if singular.len() < 2 || singular == word || singular == GENERIC_KEY {
        return None;
    }
    Some(format!("{prefix}{singular}"))
}

/// Append inferred relationships and flag the referencing columns.
///
/// Returns the number of relationships added.
pub fn infer(tables: &mut [Table], relationships: &mut Vec<Relationship>) -> usize {
    let index = PrimaryKeyIndex::build(tables);
    let before = relationships.len();

    for table in tables.iter_mut() {
        let table_key = table.name.to_lowercase();
        let own_pk = table.primary_key().map(|c| c.name.clone());

        for ci in 0..table.columns.len() {
            let lowered = table.columns[ci].name.to_lowercase();
            let literal = index
                .iter()
                .any(|e| e.key != table_key && e.matches_column(&lowered));

            for entry in index.iter() {
                if entry.key == table_key {
                    continue;
                }

                let matched = if literal {
                    entry.matches_column(&lowered)
                } else {
                    entry.matches_singular(&lowered)
                };
                if matched {
                    table.columns[ci].is_fk = true;
                    let column = &table.columns[ci].name;
                    let exists = relationships
                        .iter()
                        .any(|r| r.same_reference(&table.name, column, &entry.column));
                    if !exists {
                        trace!(
                            source = %table.name,
                            column = %column,
                            target = %entry.table,
                            "inferred reference from column name"
                        );
                        relationships.push(Relationship::standard(
                            table.name.clone(),
                            column.clone(),
                            entry.table.clone(),
                            entry.column.clone(),
                        ));
                    }
                }

                let Some(pk) = own_pk.as_deref() else {
                    continue;
                };
                if !pk.eq_ignore_ascii_case(&entry.column) || pk.eq_ignore_ascii_case(GENERIC_KEY) {
                    continue;
                }
                let exists = relationships
                    .iter()
                    .any(|r| r.connects(&table.name, &entry.table) && r.source_column.eq_ignore_ascii_case(pk));
                if !exists {
                    trace!(source = %table.name, target = %entry.table, key = pk, "inferred shared primary key");
                    relationships.push(Relationship::shared_primary_key(
                        table.name.clone(),
                        entry.table.clone(),
                        pk,
                    ));
                    table.mark_foreign_key(pk);
                }
            }
        }
    }

    let added = relationships.len() - before;
    debug!(
        indexed_keys = index.len(),
        inferred = added,
        "inferred implicit relationships"
    );
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, RelationshipKind};

    fn table(name: &str, cols: &[(&str, bool)]) -> Table {
        Table {
            name: name.to_string(),
            columns: cols
                .iter()
                .map(|(n, pk)| Column {
                    is_pk: *pk,
                    ..Column::new(*n, "INT")
                })
                .collect(),
        }
    }

    #[test]
    fn test_index_uses_first_primary_key() {
        let tables = vec![
            table("Users", &[("name", false), ("user_id", true), ("tenant", true)]),
            table("logs", &[("msg", false)]),
        ];
        let index = PrimaryKeyIndex::build(&tables);

        assert_eq!(index.len(), 1);
        let entry = index.get("USERS").unwrap();
        assert_eq!(entry.key, "users");
        assert_eq!(entry.table, "Users");
        assert_eq!(entry.column, "user_id");
        assert!(index.get("logs").is_none());
    }

    #[test]
    fn test_patterns() {
        let entry = PrimaryKeyEntry::new("User", "id");
        assert_eq!(entry.key, "user");
        assert_eq!(entry.patterns(), ["user_id", "userid", "user"]);
        assert!(entry.matches_column("userid"));
        assert!(!entry.matches_column("users_id"));
    }

    #[test]
    fn test_singular_patterns() {
        let entry = PrimaryKeyEntry::new("categories", "id");
        assert_eq!(entry.patterns(), ["categories_id", "categoriesid", "categories"]);
        assert_eq!(entry.singular_patterns(), ["category_id", "categoryid", "category"]);
        assert!(!entry.matches_column("category_id"));
        assert!(entry.matches_singular("category_id"));
    }

    #[test]
    fn test_singular_keeps_prefix_before_separator() {
        let entry = PrimaryKeyEntry::new("shop-orders", "id");
        assert_eq!(entry.singular_patterns()[0], "shop-order_id");
        assert!(!entry.matches_singular("order_id"));

        let entry = PrimaryKeyEntry::new("shop_orders", "id");
        assert_eq!(entry.singular_patterns()[0], "shop_order_id");
    }

    #[test]
    fn test_degenerate_singular_forms_are_dropped() {
        assert!(PrimaryKeyEntry::new("ids", "code").singular_patterns().is_empty());
        assert!(PrimaryKeyEntry::new("is", "code").singular_patterns().is_empty());
        assert!(PrimaryKeyEntry::new("user", "id").singular_patterns().is_empty());
        assert!(PrimaryKeyEntry::new("a-", "id").singular_patterns().is_empty());
    }

    #[test]
    fn test_literal_match_wins_over_singular() {
        let mut tables = vec![
            table("users", &[("id", true)]),
            table("user", &[("id", true)]),
            table("orders", &[("id", true), ("user_id", false)]),
        ];
        let mut rels = Vec::new();

        infer(&mut tables, &mut rels);

        assert_eq!(rels, vec![Relationship::standard("orders", "user_id", "user", "id")]);
    }

    #[test]
    fn test_plural_id_table_does_not_claim_id_columns() {
        let mut tables = vec![
            table("ids", &[("code", true)]),
            table("users", &[("id", true)]),
            table("orders", &[("id", true)]),
        ];
        let mut rels = Vec::new();

        assert_eq!(infer(&mut tables, &mut rels), 0);
        assert!(tables.iter().flat_map(|t| &t.columns).all(|c| !c.is_fk));
    }

    #[test]
    fn test_separator_prefix_is_not_dropped() {
        let mut tables = vec![
            table("shop-orders", &[("id", true)]),
            table("invoices", &[("id", true), ("order_id", false)]),
        ];
        let mut rels = Vec::new();

        assert_eq!(infer(&mut tables, &mut rels), 0);
        assert!(!tables[1].columns[1].is_fk);
    }

    #[test]
    fn test_infers_reference_from_column_name() {
        let mut tables = vec![
            table("users", &[("id", true)]),
            table("orders", &[("id", true), ("user_id", false)]),
        ];
        let mut rels = Vec::new();

        let added = infer(&mut tables, &mut rels);

        assert_eq!(added, 1);
        assert_eq!(rels[0], Relationship::standard("orders", "user_id", "users", "id"));
        assert!(tables[1].columns[1].is_fk);
        assert!(!tables[0].columns[0].is_fk);
    }

    #[test]
    fn test_all_three_patterns_match() {
        let mut tables = vec![
            table("user", &[("id", true)]),
            table("a", &[("pk", true), ("user_id", false)]),
            table("b", &[("pk2", true), ("USERID", false)]),
            table("c", &[("pk3", true), ("User", false)]),
        ];
        let mut rels = Vec::new();
        infer(&mut tables, &mut rels);

        let sources: Vec<(&str, &str)> = rels
            .iter()
            .map(|r| (r.source_table.as_str(), r.source_column.as_str()))
            .collect();
        assert_eq!(sources, vec![("a", "user_id"), ("b", "USERID"), ("c", "User")]);
        assert!(rels.iter().all(|r| r.target_table == "user" && r.target_column == "id"));
    }

    #[test]
    fn test_explicit_relationship_is_not_duplicated() {
        let mut tables = vec![
            table("users", &[("id", true)]),
            table("orders", &[("id", true), ("users_id", false)]),
        ];
        tables[1].columns[1].is_fk = true;
        let mut rels = vec![Relationship::standard("orders", "USERS_ID", "users", "ID")];

        let added = infer(&mut tables, &mut rels);
        assert_eq!(added, 0);
        assert_eq!(rels.len(), 1);
    }

    #[test]
    fn test_table_never_matches_itself() {
        let mut tables = vec![table("node", &[("id", true), ("node_id", false)])];
        let mut rels = Vec::new();

        assert_eq!(infer(&mut tables, &mut rels), 0);
        assert!(!tables[0].columns[1].is_fk);
    }

    #[test]
    fn test_shared_primary_key_added_once() {
        let mut tables = vec![
            table("accounts", &[("acct_no", true), ("name", false)]),
            table("profiles", &[("ACCT_NO", true), ("bio", false)]),
        ];
        let mut rels = Vec::new();

        infer(&mut tables, &mut rels);

        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].kind, RelationshipKind::SharedPrimaryKey);
        assert_eq!(rels[0].source_table, "accounts");
        assert_eq!(rels[0].target_table, "profiles");
        assert_eq!(rels[0].source_column, "acct_no");
        assert!(tables[0].columns[0].is_fk);
    }

    #[test]
    fn test_shared_generic_id_is_ignored() {
        let mut tables = vec![
            table("accounts", &[("id", true)]),
            table("profiles", &[("ID", true)]),
        ];
        let mut rels = Vec::new();

        assert_eq!(infer(&mut tables, &mut rels), 0);
    }

    #[test]
    fn test_shared_key_skipped_when_edge_uses_key() {
        let mut tables = vec![
            table("accounts", &[("acct_no", true)]),
            table("profiles", &[("acct_no", true)]),
        ];
        let mut rels = vec![Relationship::standard("profiles", "acct_no", "accounts", "acct_no")];

        assert_eq!(infer(&mut tables, &mut rels), 0);
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            vec![
                table("users", &[("id", true)]),
                table("teams", &[("team_code", true), ("user_id", false)]),
                table("squads", &[("team_code", true), ("users", false)]),
            ]
        };
        let (mut a, mut b) = (build(), build());
        let (mut ra, mut rb) = (Vec::new(), Vec::new());
        infer(&mut a, &mut ra);
        infer(&mut b, &mut rb);

        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }
}
