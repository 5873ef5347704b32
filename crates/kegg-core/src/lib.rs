pub mod types;
pub mod error;
pub mod kinds;
pub mod relations;
pub mod lookup;
pub mod dedup;
pub mod sink;
pub mod config;
pub mod processor;
pub mod pipeline;

pub use error::{KeggError, Result};
pub use types::*;
pub use kinds::IdKind;
pub use relations::{EdgeTyping, LinkShape, HAS_PARTICIPANT, RO_HAS_PARTICIPANT};
pub use lookup::{LookupPaths, LookupTable, LookupTables};
pub use dedup::DedupState;
pub use sink::{FileGraphWriter, GraphSink, TsvGraphWriter};
pub use config::{LinkFiles, MissingPolicy, OutputPaths, TransformConfig};
pub use processor::{FileReport, LinkFileProcessor};
pub use pipeline::{KeggTransform, RunReport};
