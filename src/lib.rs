pub mod ast;
pub mod engine;
pub mod error;
pub mod infer;
pub mod ir;
pub mod layout;
pub mod measure;
pub mod model;
pub mod normalize;
pub mod query;
pub mod resolve;
pub mod serializer;
pub mod sql;
pub mod stats;

use wasm_bindgen::prelude::*;

pub use engine::{analyze, analyze_sql, AnalyzeOptions, SchemaGraph};
pub use error::EngineError;
pub use sql::Dialect;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Analyze a DDL script and return the schema graph as JSON
#[wasm_bindgen(js_name = "analyzeSchema")]
pub fn analyze_schema(source: &str, dialect: Option<String>) -> Result<String, String> {
    let dialect = match dialect.as_deref() {
        Some(name) => Dialect::from_str(name).ok_or_else(|| format!("Unknown dialect: {name}"))?,
        None => Dialect::Auto,
    };
    let options = AnalyzeOptions {
        dialect,
        ..AnalyzeOptions::default()
    };

    let mut graph = analyze_sql(source, &options).map_err(|e| e.to_string())?;
    graph.apply_layout(&layout::LayeredLayout::default());
    graph.to_json(false).map_err(|e| e.to_string())
}
