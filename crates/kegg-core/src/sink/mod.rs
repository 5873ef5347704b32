mod traits;
mod tsv;

pub use traits::GraphSink;
pub use tsv::{FileGraphWriter, TsvGraphWriter};
