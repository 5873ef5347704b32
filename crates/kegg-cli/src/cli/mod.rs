pub mod config_cmd;
pub mod doctor;
pub mod stats;
pub mod transform;

use clap::{Args, Parser, Subcommand};
use kegg_core::RunReport;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kegg")]
#[command(version, about = "KEGG link files to knowledge-graph node and edge tables")]
pub struct Cli {
    /// Path to kegg.toml
    #[arg(long, global = true, env = "KEGG_CONFIG", default_value = "kegg.toml")]
    pub config: PathBuf,

    /// Directory holding the KEGG link and list files (overrides config file)
    #[arg(long, global = true, env = "KEGG_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory for nodes.tsv and edges.tsv (overrides config file)
    #[arg(long, global = true, env = "KEGG_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the five link files into node and edge tables
    Transform(TransformArgs),
    /// Check that every input file is present and well-shaped
    Doctor,
    /// Count rows of the produced tables by category and predicate
    Stats,
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    Validate,
    Show,
}

// --- Transform args ---

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// "abort", "skip-row" or "placeholder"; overrides [transform] on_missing
    #[arg(long)]
    pub on_missing: Option<String>,
    /// "text" or "json"
    #[arg(long, default_value = "text")]
    pub format: String,
}

// --- Table printing helpers ---

pub fn print_report_table(report: &RunReport) {
    if report.files.is_empty() {
        println!("(no files)");
        return;
    }
    println!(
        "{:<40}  {:<20}  {:>8}  {:>8}  {:>8}  {:>8}",
        "FILE", "SHAPE", "ROWS", "NODES", "EDGES", "SKIPPED"
    );
    println!("{}", "─".repeat(102));
    for f in &report.files {
        let shape = f.shape.map(|s| s.label()).unwrap_or("(unrecognised)");
        println!(
            "{:<40}  {:<20}  {:>8}  {:>8}  {:>8}  {:>8}",
            truncate(&f.file, 40),
            shape,
            f.rows,
            f.nodes_written,
            f.edges_written,
            f.skipped_rows
        );
    }
    println!("{}", "─".repeat(102));
    println!(
        "{:<40}  {:<20}  {:>8}  {:>8}  {:>8}  {:>8}",
        "TOTAL",
        "",
        report.rows(),
        report.nodes_written,
        report.edges_written,
        report.skipped_rows()
    );
}

/// Keep the tail of long values; file paths differ at the end.
pub fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        format!("…{}", s.chars().skip(count - (max - 1)).collect::<String>())
    }
}
