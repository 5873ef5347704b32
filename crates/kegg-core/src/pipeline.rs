use crate::config::TransformConfig;
use crate::dedup::DedupState;
use crate::error::{KeggError, Result};
use crate::lookup::LookupTables;
use crate::processor::{FileReport, LinkFileProcessor};
use crate::sink::{FileGraphWriter, GraphSink};
use crate::types::WriteMode;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

/// Summary of a whole transform run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub nodes_written: u64,
    pub edges_written: u64,
}

/// Runs the five KEGG link files through `LinkFileProcessor` in order.
///
/// # Example
/// ```rust,no_run
/// use kegg_core::{KeggTransform, TransformConfig};
///
/// let report = KeggTransform::new(TransformConfig::from_dirs("data/raw/kegg", "data/transformed/kegg"))
///     .run()
///     .unwrap();
/// println!("{} nodes, {} edges", report.nodes_written, report.edges_written);
/// ```
pub struct KeggTransform {
    config: TransformConfig,
}

impl KeggTransform {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Load the lookup tables once, then process every link file.
    pub fn run(&self) -> Result<RunReport> {
        let tables = LookupTables::load(&self.config.lookups)?;
        self.run_with_tables(&tables)
    }

    /// Process every link file against already-loaded lookup tables.
    ///
    /// The first file truncates the outputs and writes their headers; the
    /// rest append. Node and edge dedup spans the whole run.
    pub fn run_with_tables(&self, tables: &LookupTables) -> Result<RunReport> {
        let processor =
            LinkFileProcessor::new(tables).with_missing_policy(self.config.on_missing);
        let mut state = DedupState::new();
        let mut report = RunReport::default();

        for (i, (_, path)) in self.config.links.ordered().into_iter().enumerate() {
            let mode = if i == 0 {
                WriteMode::Overwrite
            } else {
                WriteMode::Append
            };

            let input = File::open(path).map_err(|e| KeggError::io(path, e))?;
            let mut sink = FileGraphWriter::open(&self.config.output, mode)?;
            let file_report = processor.process(
                &path.display().to_string(),
                BufReader::new(input),
                &mut sink,
                mode,
                &mut state,
            )?;
            sink.finish()?;

            report.nodes_written += file_report.nodes_written;
            report.edges_written += file_report.edges_written;
            report.files.push(file_report);
        }

        info!(
            "Wrote {} nodes to {} and {} edges to {}",
            report.nodes_written,
            self.config.output.nodes.display(),
            report.edges_written,
            self.config.output.edges.display()
        );
        Ok(report)
    }
}

impl RunReport {
    pub fn rows(&self) -> u64 {
        self.files.iter().map(|f| f.rows).sum()
    }

    pub fn skipped_rows(&self) -> u64 {
        self.files.iter().map(|f| f.skipped_rows).sum()
    }
}
