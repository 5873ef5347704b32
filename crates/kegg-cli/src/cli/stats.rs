use crate::config::KeggConfig;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Row counts grouped by one column of a produced table
#[derive(Debug, Default, PartialEq)]
pub struct TableCounts {
    pub total: u64,
    pub by_column: BTreeMap<String, u64>,
}

pub async fn run(config: KeggConfig) -> Result<()> {
    let output = config.output_paths();
    let nodes = count_by_column(&output.nodes, "category")?;
    let edges = count_by_column(&output.edges, "predicate")?;

    println!();
    println!("Graph Overview");
    println!("{}", "─".repeat(50));
    println!("Nodes:   {:>8}", nodes.total);
    for (category, count) in &nodes.by_column {
        println!("  {:32} {:>8}", category, count);
    }

    println!("Edges:   {:>8}", edges.total);
    for (predicate, count) in &edges.by_column {
        let label = if predicate.is_empty() { "(none)" } else { predicate.as_str() };
        println!("  {:32} {:>8}", label, count);
    }
    println!("{}", "─".repeat(50));
    println!();

    Ok(())
}

pub fn count_by_column(path: &Path, column: &str) -> Result<TableCounts> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let idx = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .with_context(|| format!("{} has no '{}' column", path.display(), column))?;

    let mut counts = TableCounts::default();
    for record in rdr.records() {
        let record = record?;
        let key = record.get(idx).unwrap_or_default().to_string();
        *counts.by_column.entry(key).or_default() += 1;
        counts.total += 1;
    }
    Ok(counts)
}
