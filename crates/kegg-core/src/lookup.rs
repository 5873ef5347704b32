use crate::error::{KeggError, Result};
use crate::kinds::IdKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Identifier -> display name for one identifier kind
#[derive(Debug, Clone)]
pub struct LookupTable {
    kind: IdKind,
    names: HashMap<String, String>,
}

/// Locations of the four KEGG list files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupPaths {
    pub compound: PathBuf,
    pub reaction: PathBuf,
    pub pathway: PathBuf,
    pub orthology: PathBuf,
}

/// All four lookup tables, loaded once per run
#[derive(Debug, Clone)]
pub struct LookupTables {
    compound: LookupTable,
    reaction: LookupTable,
    pathway: LookupTable,
    orthology: LookupTable,
}

impl LookupTable {
    pub fn new(kind: IdKind) -> Self {
        Self {
            kind,
            names: HashMap::new(),
        }
    }

    pub fn from_path(kind: IdKind, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| KeggError::io(path, e))?;
        let table = Self::from_reader(kind, file)?;
        if table.is_empty() {
            log::warn!("{} lookup {} has no entries", kind, path.display());
        }
        log::info!(
            "Loaded {} lookup: {} entries from {}",
            kind,
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Read a tab-separated list file. The header must carry the kind's id
    /// column (`cpdId`) and name column (`cpd`); other columns are ignored.
    pub fn from_reader<R: Read>(kind: IdKind, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| KeggError::MissingColumn {
                    table: kind.to_string(),
                    column: column.to_string(),
                })
        };
        let id_idx = position(kind.id_column())?;
        let name_idx = position(kind.name_column())?;

        let mut table = Self::new(kind);
        for record in rdr.records() {
            let record = record?;
            let (Some(id), Some(name)) = (record.get(id_idx), record.get(name_idx)) else {
                continue;
            };
            table.insert(id, name);
        }
        Ok(table)
    }

    /// Add an entry. The first name recorded for an id wins.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.entry(id.into()).or_insert_with(|| name.into());
    }

    /// Display name for a raw identifier as it appears in a link file.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        self.names
            .get(self.kind.lookup_key(raw).as_ref())
            .map(String::as_str)
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl LookupPaths {
    pub fn get(&self, kind: IdKind) -> &Path {
        match kind {
            IdKind::Compound => &self.compound,
            IdKind::Reaction => &self.reaction,
            IdKind::Pathway => &self.pathway,
            IdKind::Orthology => &self.orthology,
        }
    }
}

impl LookupTables {
    pub fn new(
        compound: LookupTable,
        reaction: LookupTable,
        pathway: LookupTable,
        orthology: LookupTable,
    ) -> Result<Self> {
        let tables = Self {
            compound,
            reaction,
            pathway,
            orthology,
        };
        for kind in IdKind::ALL {
            if tables.get(kind).kind() != kind {
                return Err(KeggError::Validation(format!(
                    "{} table supplied in the {} slot",
                    tables.get(kind).kind(),
                    kind
                )));
            }
        }
        Ok(tables)
    }

    pub fn load(paths: &LookupPaths) -> Result<Self> {
        Ok(Self {
            compound: LookupTable::from_path(IdKind::Compound, &paths.compound)?,
            reaction: LookupTable::from_path(IdKind::Reaction, &paths.reaction)?,
            pathway: LookupTable::from_path(IdKind::Pathway, &paths.pathway)?,
            orthology: LookupTable::from_path(IdKind::Orthology, &paths.orthology)?,
        })
    }

    pub fn get(&self, kind: IdKind) -> &LookupTable {
        match kind {
            IdKind::Compound => &self.compound,
            IdKind::Reaction => &self.reaction,
            IdKind::Pathway => &self.pathway,
            IdKind::Orthology => &self.orthology,
        }
    }

    pub fn resolve(&self, kind: IdKind, raw: &str) -> Option<&str> {
        self.get(kind).resolve(raw)
    }
}
