use crate::error::Result;
use crate::types::{Edge, Node};

/// Destination for the node and edge tables
pub trait GraphSink {
    /// Write the header row of both tables
    fn write_headers(&mut self) -> Result<()>;

    /// Write one node row
    fn write_node(&mut self, node: &Node) -> Result<()>;

    /// Write one edge row
    fn write_edge(&mut self, edge: &Edge) -> Result<()>;

    /// Flush buffered rows to the underlying streams
    fn finish(&mut self) -> Result<()>;
}
