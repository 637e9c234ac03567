use anyhow::{Context, Result};
use clap::Parser;
use ddlgraph::layout::{Direction, LayeredLayout};
use ddlgraph::serializer::serialize;
use ddlgraph::stats::StatsOptions;
use ddlgraph::{analyze_sql, AnalyzeOptions, Dialect, EngineError};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Turn a SQL DDL script into a schema graph with inferred relationships.
#[derive(Debug, Parser)]
#[command(name = "ddlgraph", version)]
struct Cli {
    /// Input DDL file, `-` for stdin
    #[arg(default_value = "-")]
    input: String,

    /// SQL dialect: auto, generic, postgres, mysql, sqlite
    #[arg(short, long, default_value = "auto", value_parser = parse_dialect)]
    dialect: Dialect,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compute node positions
    #[arg(long)]
    layout: bool,

    /// Layout direction: LR or TB
    #[arg(long, default_value = "LR", value_parser = parse_direction)]
    direction: Direction,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Print the reconstructed DDL instead of JSON
    #[arg(long, conflicts_with_all = ["search", "neighbors"])]
    ddl: bool,

    /// Print nodes whose table or column names contain this text
    #[arg(long, conflicts_with = "neighbors")]
    search: Option<String>,

    /// Print a table and the tables linked to it
    #[arg(long)]
    neighbors: Option<String>,

    /// Number of most connected tables reported
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Column count above which a table is reported as wide
    #[arg(long, default_value_t = 20)]
    wide_columns: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    Dialect::from_str(s).ok_or_else(|| format!("unknown dialect: {s}"))
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::from_str(s).ok_or_else(|| format!("unknown direction: {s} (expected LR or TB)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<EngineError>() {
                Some(e) if e.is_input_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = read_input(&cli.input)?;
    let options = AnalyzeOptions {
        dialect: cli.dialect,
        stats: StatsOptions {
            top_connected: cli.top,
            wide_table_columns: cli.wide_columns,
        },
    };

    let mut graph = analyze_sql(&source, &options)?;
    if cli.layout {
        graph.apply_layout(&LayeredLayout::new(cli.direction));
    }

    let rendered = if cli.ddl {
        serialize(&graph.tables)
    } else if let Some(term) = &cli.search {
        to_json(&graph.graph.search(term), cli.compact)?
    } else if let Some(table) = &cli.neighbors {
        to_json(&graph.graph.neighbors(table), cli.compact)?
    } else {
        graph.to_json(!cli.compact)?
    };

    match &cli.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
