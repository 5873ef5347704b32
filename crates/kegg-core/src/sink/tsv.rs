use crate::config::OutputPaths;
use crate::error::{KeggError, Result};
use crate::sink::traits::GraphSink;
use crate::types::{Edge, Node, WriteMode, EDGE_HEADER, NODE_HEADER};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Tab-separated node and edge tables.
///
/// Fields are written verbatim: no quoting, one `\n`-terminated line per row.
pub struct TsvGraphWriter<W: Write> {
    nodes: csv::Writer<W>,
    edges: csv::Writer<W>,
}

/// Writer over the two output files of a run
pub type FileGraphWriter = TsvGraphWriter<File>;

fn tsv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

impl<W: Write> TsvGraphWriter<W> {
    pub fn new(nodes: W, edges: W) -> Self {
        Self {
            nodes: tsv_writer(nodes),
            edges: tsv_writer(edges),
        }
    }

    /// Flush and hand back the node and edge streams.
    pub fn into_inner(self) -> Result<(W, W)> {
        let nodes = self
            .nodes
            .into_inner()
            .map_err(|e| KeggError::Stream(e.into_error()))?;
        let edges = self
            .edges
            .into_inner()
            .map_err(|e| KeggError::Stream(e.into_error()))?;
        Ok((nodes, edges))
    }
}

impl TsvGraphWriter<File> {
    /// Open both output files. `Overwrite` truncates; `Append` keeps existing
    /// rows and creates the file if it is missing.
    pub fn open(paths: &OutputPaths, mode: WriteMode) -> Result<Self> {
        let nodes = open_output(&paths.nodes, mode)?;
        let edges = open_output(&paths.edges, mode)?;
        Ok(Self::new(nodes, edges))
    }
}

fn open_output(path: &Path, mode: WriteMode) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KeggError::io(parent, e))?;
    }
    let file = match mode {
        WriteMode::Overwrite => File::create(path),
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
    };
    file.map_err(|e| KeggError::io(path, e))
}

impl<W: Write> GraphSink for TsvGraphWriter<W> {
    fn write_headers(&mut self) -> Result<()> {
        self.nodes.write_record(NODE_HEADER)?;
        self.edges.write_record(EDGE_HEADER)?;
        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> Result<()> {
        self.nodes.write_record(node.fields())?;
        Ok(())
    }

    fn write_edge(&mut self, edge: &Edge) -> Result<()> {
        self.edges.write_record(edge.fields())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.nodes.flush()?;
        self.edges.flush()?;
        Ok(())
    }
}
