use std::collections::HashSet;

/// Membership sets for nodes and edges already written during a run.
///
/// Owned by the caller and threaded through every link file so a node or
/// edge is written at most once per run.
#[derive(Debug, Clone, Default)]
pub struct DedupState {
    nodes: HashSet<String>,
    edges: HashSet<String>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge key for a row: raw identifiers in column order joined by `-`.
    pub fn edge_key<S: AsRef<str>>(ids: &[S]) -> String {
        let mut key = String::new();
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                key.push('-');
            }
            key.push_str(id.as_ref());
        }
        key
    }

    /// Record a raw node identifier. Returns true the first time it is seen.
    pub fn insert_node(&mut self, raw: &str) -> bool {
        if self.nodes.contains(raw) {
            return false;
        }
        self.nodes.insert(raw.to_string())
    }

    /// Record an edge key. Returns true the first time it is seen.
    pub fn insert_edge(&mut self, key: &str) -> bool {
        if self.edges.contains(key) {
            return false;
        }
        self.edges.insert(key.to_string())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
