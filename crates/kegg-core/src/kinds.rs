use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The four KEGG identifier kinds that appear in link files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    /// Small molecules. Example: `C00001` (water).
    Compound,

    /// Enzymatic reactions. Example: `R00010`.
    Reaction,

    /// Reference and organism-specific pathway maps.
    /// Example: `map00010`, `rn00010`, `ko00010`.
    Pathway,

    /// KEGG Orthology groups. Example: `K00844`.
    Orthology,
}

impl IdKind {
    pub const ALL: [IdKind; 4] = [
        IdKind::Compound,
        IdKind::Reaction,
        IdKind::Pathway,
        IdKind::Orthology,
    ];

    /// Column stem shared by link-file headers and lookup tables.
    pub fn stem(self) -> &'static str {
        match self {
            IdKind::Compound => "cpd",
            IdKind::Reaction => "rn",
            IdKind::Pathway => "pathway",
            IdKind::Orthology => "ko",
        }
    }

    /// Header name of this kind's identifier column (`cpdId`, `rnId`, ...).
    pub fn id_column(self) -> &'static str {
        match self {
            IdKind::Compound => "cpdId",
            IdKind::Reaction => "rnId",
            IdKind::Pathway => "pathwayId",
            IdKind::Orthology => "koId",
        }
    }

    /// Lookup-table column holding the display name. Same as the stem.
    pub fn name_column(self) -> &'static str {
        self.stem()
    }

    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Compound => "KEGG.COMPOUND:",
            IdKind::Reaction => "KEGG.REACTION:",
            IdKind::Pathway => "KEGG.PATHWAY:",
            IdKind::Orthology => "KEGG.ORTHOLOGY:",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            IdKind::Compound => "biolink:ChemicalSubstance",
            IdKind::Reaction => "biolink:MolecularActivity",
            IdKind::Pathway => "biolink:Pathway",
            IdKind::Orthology => "biolink:GeneFamily",
        }
    }

    /// Resolve a header column to a kind by dropping its last two
    /// characters (`cpdId` -> `cpd`).
    pub fn from_column(column: &str) -> Option<Self> {
        let cut = column.char_indices().rev().nth(1).map(|(i, _)| i)?;
        Self::from_stem(&column[..cut])
    }

    pub fn from_stem(stem: &str) -> Option<Self> {
        IdKind::ALL.into_iter().find(|k| k.stem() == stem)
    }

    /// Namespaced node id for a raw identifier.
    pub fn curie(self, raw: &str) -> String {
        format!("{}{}", self.prefix(), raw)
    }

    /// Key to look up in this kind's reference table.
    ///
    /// Pathway tables only list the reference `map` form, so `rn00010`
    /// and `ko00010` are looked up as `map00010`. An `rn` substitution
    /// takes precedence over `ko`.
    pub fn lookup_key(self, raw: &str) -> Cow<'_, str> {
        match self {
            IdKind::Pathway if raw.contains("rn") => Cow::Owned(raw.replace("rn", "map")),
            IdKind::Pathway if raw.contains("ko") => Cow::Owned(raw.replace("ko", "map")),
            _ => Cow::Borrowed(raw),
        }
    }
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdKind::Compound => write!(f, "compound"),
            IdKind::Reaction => write!(f, "reaction"),
            IdKind::Pathway => write!(f, "pathway"),
            IdKind::Orthology => write!(f, "orthology"),
        }
    }
}
