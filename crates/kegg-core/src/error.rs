use crate::kinds::IdKind;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeggError>;

#[derive(Debug, Error)]
pub enum KeggError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stream error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Lookup table '{table}' has no '{column}' column")]
    MissingColumn { table: String, column: String },

    #[error("Column '{column}' does not name a KEGG identifier kind")]
    UnknownColumn { column: String },

    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Identifier not resolvable: {kind} '{id}' (line {line}) is absent from its reference table")]
    UnresolvedIdentifier { kind: IdKind, id: String, line: u64 },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl KeggError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KeggError::Io {
            path: path.into(),
            source,
        }
    }
}
