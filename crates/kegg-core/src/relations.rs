use crate::kinds::IdKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const HAS_PARTICIPANT: &str = "biolink:has_participant";
pub const RO_HAS_PARTICIPANT: &str = "RO:0000057";

/// The five kinds of link file, named by the two identifier columns they join
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LinkShape {
    PathwayCompound,
    ReactionCompound,
    PathwayReaction,
    PathwayOrthology,
    ReactionOrthology,
}

/// Predicate label and relation code stamped on every edge of a file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeTyping {
    pub predicate: String,
    pub relation: String,
}

impl LinkShape {
    /// Priority order used when a header carries more than one known pair.
    pub const ALL: [LinkShape; 5] = [
        LinkShape::PathwayCompound,
        LinkShape::ReactionCompound,
        LinkShape::PathwayReaction,
        LinkShape::PathwayOrthology,
        LinkShape::ReactionOrthology,
    ];

    pub fn kinds(self) -> (IdKind, IdKind) {
        match self {
            LinkShape::PathwayCompound => (IdKind::Pathway, IdKind::Compound),
            LinkShape::ReactionCompound => (IdKind::Reaction, IdKind::Compound),
            LinkShape::PathwayReaction => (IdKind::Pathway, IdKind::Reaction),
            LinkShape::PathwayOrthology => (IdKind::Pathway, IdKind::Orthology),
            LinkShape::ReactionOrthology => (IdKind::Reaction, IdKind::Orthology),
        }
    }

    /// Classify a link file from its header columns.
    ///
    /// Only columns that name an identifier kind take part, so the answer
    /// does not depend on column order. Returns `None` when no known pair
    /// is present.
    pub fn classify<S: AsRef<str>>(header: &[S]) -> Option<LinkShape> {
        let present: BTreeSet<IdKind> = header
            .iter()
            .filter_map(|column| {
                let column = column.as_ref();
                IdKind::ALL.into_iter().find(|k| k.id_column() == column)
            })
            .collect();

        LinkShape::ALL.into_iter().find(|shape| {
            let (a, b) = shape.kinds();
            present.contains(&a) && present.contains(&b)
        })
    }

    pub fn typing(self) -> EdgeTyping {
        // Every KEGG link currently reads as participation.
        EdgeTyping {
            predicate: HAS_PARTICIPANT.to_string(),
            relation: RO_HAS_PARTICIPANT.to_string(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkShape::PathwayCompound => "pathway-compound",
            LinkShape::ReactionCompound => "reaction-compound",
            LinkShape::PathwayReaction => "pathway-reaction",
            LinkShape::PathwayOrthology => "pathway-orthology",
            LinkShape::ReactionOrthology => "reaction-orthology",
        }
    }
}

impl EdgeTyping {
    /// Typing for a header that matched no known pair.
    pub fn blank() -> Self {
        EdgeTyping {
            predicate: String::new(),
            relation: String::new(),
        }
    }

    pub fn for_shape(shape: Option<LinkShape>) -> Self {
        shape.map(LinkShape::typing).unwrap_or_else(EdgeTyping::blank)
    }
}

impl std::fmt::Display for LinkShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
