//! SQL dialect detection and handling.

use sqlparser::dialect::{GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};

/// SQL dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Auto-detect from script content
    #[default]
    Auto,
    /// Standard SQL
    Generic,
    /// PostgreSQL
    PostgreSQL,
    /// MySQL / MariaDB
    MySQL,
    /// SQLite
    SQLite,
}

impl Dialect {
    /// Parse dialect from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "generic" | "ansi" => Some(Self::Generic),
            "postgres" | "postgresql" | "pg" => Some(Self::PostgreSQL),
            "mysql" | "mariadb" => Some(Self::MySQL),
            "sqlite" | "sqlite3" => Some(Self::SQLite),
            _ => None,
        }
    }

    /// Detect dialect from SQL content.
    pub fn detect(content: &str) -> Self {
        let lower = content.to_lowercase();

        // Check header comments
        if lower.contains("postgresql database dump")
            || lower.contains("pg_dump")
            || lower.contains("-- postgres")
        {
            return Self::PostgreSQL;
        }
        if lower.contains("mysql dump")
            || lower.contains("mysqldump")
            || lower.contains("-- mysql")
            || lower.contains("mariadb dump")
        {
            return Self::MySQL;
        }
        if lower.contains("-- sqlite") || lower.contains("pragma ") {
            return Self::SQLite;
        }

        // Check type keywords
        if lower.contains("serial")
            || lower.contains("text[]")
            || lower.contains("::text")
            || lower.contains("timestamptz")
            || lower.contains("jsonb")
        {
            return Self::PostgreSQL;
        }
        if lower.contains("auto_increment")
            || lower.contains("tinyint")
            || lower.contains("engine=")
            || lower.contains("unsigned")
            || content.contains('`')
        {
            return Self::MySQL;
        }
        if lower.contains("autoincrement") || lower.contains("without rowid") {
            return Self::SQLite;
        }

        Self::Generic
    }

    /// Resolve Auto to a concrete dialect.
    pub fn resolve(self, content: &str) -> Self {
        match self {
            Self::Auto => Self::detect(content),
            other => other,
        }
    }

    /// The `sqlparser` dialect used to tokenize and parse this dialect.
    ///
    /// `Auto` should be resolved first; if it is not, the generic grammar is used.
    pub(crate) fn grammar(self) -> Box<dyn sqlparser::dialect::Dialect> {
        match self {
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::Auto | Self::Generic => Box::new(GenericDialect {}),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Generic => "generic",
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::SQLite => "sqlite",
        }
    }
}
