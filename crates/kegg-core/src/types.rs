use crate::kinds::IdKind;
use serde::{Deserialize, Serialize};

/// Column names of the node table.
pub const NODE_HEADER: [&str; 3] = ["id", "name", "category"];

/// Column names of the edge table.
pub const EDGE_HEADER: [&str; 4] = ["subject", "predicate", "object", "relation"];

/// A row of the node table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// Namespaced identifier, e.g. `KEGG.COMPOUND:C00001`.
    pub id: String,

    /// Display name from the kind's lookup table.
    pub name: String,

    /// Biolink category of the kind.
    pub category: String,
}

/// A row of the edge table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub relation: String,
}

/// How output tables are opened for one link file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and write the header rows. Used for the first file of a run.
    Overwrite,

    /// Append rows after whatever is already there. No headers.
    Append,
}

impl Node {
    pub fn new(kind: IdKind, raw: &str, name: impl Into<String>) -> Self {
        Node {
            id: kind.curie(raw),
            name: name.into(),
            category: kind.category().to_string(),
        }
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.id, &self.name, &self.category]
    }
}

impl Edge {
    pub fn fields(&self) -> [&str; 4] {
        [&self.subject, &self.predicate, &self.object, &self.relation]
    }
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "overwrite"),
            WriteMode::Append => write!(f, "append"),
        }
    }
}
