use crate::lookup::LookupPaths;
use crate::relations::LinkShape;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when an identifier is absent from its lookup table
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    /// Fail the file (and the run) with `UnresolvedIdentifier`.
    #[default]
    Abort,

    /// Drop the whole row; nothing from it is written.
    #[serde(alias = "skip")]
    SkipRow,

    /// Use the raw identifier as the display name.
    Placeholder,
}

/// The five link inputs of a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkFiles {
    pub pathway_compound: PathBuf,
    pub reaction_compound: PathBuf,
    pub pathway_reaction: PathBuf,
    pub pathway_orthology: PathBuf,
    pub reaction_orthology: PathBuf,
}

/// Node and edge table locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputPaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
}

/// Everything a transform run needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformConfig {
    pub links: LinkFiles,
    pub lookups: LookupPaths,
    pub output: OutputPaths,
    pub on_missing: MissingPolicy,
}

impl MissingPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "abort" => Some(MissingPolicy::Abort),
            "skip-row" | "skip" => Some(MissingPolicy::SkipRow),
            "placeholder" => Some(MissingPolicy::Placeholder),
            _ => None,
        }
    }
}

impl std::fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingPolicy::Abort => write!(f, "abort"),
            MissingPolicy::SkipRow => write!(f, "skip-row"),
            MissingPolicy::Placeholder => write!(f, "placeholder"),
        }
    }
}

impl LinkFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            pathway_compound: dir.join("link_pathway_compound.tsv"),
            reaction_compound: dir.join("link_reaction_compound.tsv"),
            pathway_reaction: dir.join("link_pathway_reaction.tsv"),
            pathway_orthology: dir.join("link_pathway_ko.tsv"),
            reaction_orthology: dir.join("link_reaction_ko.tsv"),
        }
    }

    pub fn get(&self, shape: LinkShape) -> &Path {
        match shape {
            LinkShape::PathwayCompound => &self.pathway_compound,
            LinkShape::ReactionCompound => &self.reaction_compound,
            LinkShape::PathwayReaction => &self.pathway_reaction,
            LinkShape::PathwayOrthology => &self.pathway_orthology,
            LinkShape::ReactionOrthology => &self.reaction_orthology,
        }
    }

    /// Link files in processing order, paired with the shape each is
    /// expected to have.
    pub fn ordered(&self) -> [(LinkShape, &Path); 5] {
        LinkShape::ALL.map(|shape| (shape, self.get(shape)))
    }
}

impl LookupPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            compound: dir.join("list_compound.tsv"),
            reaction: dir.join("list_reaction.tsv"),
            pathway: dir.join("list_pathway.tsv"),
            orthology: dir.join("list_ko.tsv"),
        }
    }
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            nodes: dir.join("nodes.tsv"),
            edges: dir.join("edges.tsv"),
        }
    }
}

impl TransformConfig {
    /// Default file names under an input and an output directory.
    pub fn from_dirs(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        let input_dir = input_dir.as_ref();
        Self {
            links: LinkFiles::in_dir(input_dir),
            lookups: LookupPaths::in_dir(input_dir),
            output: OutputPaths::in_dir(output_dir.as_ref()),
            on_missing: MissingPolicy::default(),
        }
    }

    pub fn with_links(mut self, links: LinkFiles) -> Self {
        self.links = links;
        self
    }

    pub fn with_lookups(mut self, lookups: LookupPaths) -> Self {
        self.lookups = lookups;
        self
    }

    pub fn with_output(mut self, output: OutputPaths) -> Self {
        self.output = output;
        self
    }

    pub fn with_on_missing(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_follows_shape_priority() {
        let links = LinkFiles::in_dir(Path::new("/data/kegg"));
        let names: Vec<_> = links
            .ordered()
            .iter()
            .map(|(_, p)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "link_pathway_compound.tsv",
                "link_reaction_compound.tsv",
                "link_pathway_reaction.tsv",
                "link_pathway_ko.tsv",
                "link_reaction_ko.tsv",
            ]
        );
    }

    #[test]
    fn test_from_dirs() {
        let config = TransformConfig::from_dirs("in", "out");
        assert_eq!(config.lookups.orthology, PathBuf::from("in/list_ko.tsv"));
        assert_eq!(config.output.edges, PathBuf::from("out/edges.tsv"));
        assert_eq!(config.on_missing, MissingPolicy::Abort);
    }

    #[test]
    fn test_missing_policy_parse() {
        assert_eq!(MissingPolicy::parse("abort"), Some(MissingPolicy::Abort));
        assert_eq!(MissingPolicy::parse("skip-row"), Some(MissingPolicy::SkipRow));
        assert_eq!(MissingPolicy::parse("placeholder"), Some(MissingPolicy::Placeholder));
        assert_eq!(MissingPolicy::parse("ignore"), None);
        for policy in [MissingPolicy::Abort, MissingPolicy::SkipRow, MissingPolicy::Placeholder] {
            assert_eq!(MissingPolicy::parse(&policy.to_string()), Some(policy));
        }
    }
}
