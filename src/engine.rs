//! The extraction pipeline: statements in, schema graph out.
//!
//! ```text
//! normalize -> resolve -> infer -> stats -> ir
//! ```
//!
//! Every call allocates its own state, so concurrent calls need no coordination.

use crate::ast::Statement;
use crate::error::EngineError;
use crate::infer::infer;
use crate::ir::GraphIR;
use crate::layout::{apply_layout, LayoutAlgorithm};
use crate::measure::TextMetrics;
use crate::model::{Relationship, Table};
use crate::normalize::normalize;
use crate::resolve::resolve;
use crate::sql::{parse_sql, Dialect};
use crate::stats::{SchemaStats, StatsOptions};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub dialect: Dialect,
    pub stats: StatsOptions,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaGraph {
    pub tables: Vec<Table>,
    #[serde(flatten)]
    pub graph: GraphIR,
    pub stats: SchemaStats,
    #[serde(skip)]
    pub relationships: Vec<Relationship>,
}

/// Parse `source` and run the full pipeline.
pub fn analyze_sql(source: &str, options: &AnalyzeOptions) -> Result<SchemaGraph, EngineError> {
    if source.trim().is_empty() {
        return Err(EngineError::MissingInput);
    }
    let statements = parse_sql(source, options.dialect)?;
    Ok(analyze(&statements, &options.stats))
}

/// Run the pipeline over already-parsed statements.
pub fn analyze(statements: &[Statement], options: &StatsOptions) -> SchemaGraph {
    let pending = normalize(statements);
    let mut resolved = resolve(pending);
    let explicit = resolved.relationships.len();

    let inferred = infer(&mut resolved.tables, &mut resolved.relationships);

    let stats = SchemaStats::compute(&resolved.tables, &resolved.relationships, options);
    let graph = GraphIR::from_schema(&resolved.tables, &resolved.relationships);

    info!(
        tables = stats.table_count,
        explicit,
        inferred,
        issues = stats.potential_issues.len(),
        "schema analyzed"
    );

    SchemaGraph {
        tables: resolved.tables,
        graph,
        stats,
        relationships: resolved.relationships,
    }
}

impl SchemaGraph {
    pub fn apply_layout(&mut self, algorithm: &dyn LayoutAlgorithm) {
        apply_layout(&mut self.graph, algorithm, &TextMetrics::default());
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, EngineError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        debug!(bytes = json.len(), "serialized schema graph");
        Ok(json)
    }
}
