use kegg_core::{LinkFiles, LookupPaths, MissingPolicy, OutputPaths, TransformConfig};
use serde::{Deserialize, Serialize};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Contents of `kegg.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeggConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub transform: TransformTomlConfig,
}

/// `[input]`: where the downloaded KEGG files live.
///
/// Every file defaults to its standard name under `dir`. A relative
/// override is resolved against `dir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway_compound: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_compound: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway_reaction: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway_orthology: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_orthology: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound_list: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_list: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway_list: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orthology_list: Option<PathBuf>,
}

/// `[output]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub nodes_file: String,
    pub edges_file: String,
}

/// `[transform]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransformTomlConfig {
    /// "abort" (default), "skip-row" or "placeholder"
    pub on_missing: MissingPolicy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/raw/kegg"),
            pathway_compound: None,
            reaction_compound: None,
            pathway_reaction: None,
            pathway_orthology: None,
            reaction_orthology: None,
            compound_list: None,
            reaction_list: None,
            pathway_list: None,
            orthology_list: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/transformed/kegg"),
            nodes_file: "nodes.tsv".into(),
            edges_file: "edges.tsv".into(),
        }
    }
}

impl KeggConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path).with_context(|| format!("Failed to load config {}", path.display()))
    }

    /// Command-line directories take precedence over the file.
    pub fn with_overrides(mut self, input_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = input_dir {
            self.input.dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output.dir = dir;
        }
        self
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.input.dir.as_os_str().is_empty() {
            errors.push("[input] dir must not be empty".to_string());
        } else if !self.input.dir.is_dir() {
            errors.push(format!(
                "[input] dir {} is not a directory",
                self.input.dir.display()
            ));
        }

        if self.output.nodes_file.trim().is_empty() {
            errors.push("[output] nodes_file must not be empty".to_string());
        }
        if self.output.edges_file.trim().is_empty() {
            errors.push("[output] edges_file must not be empty".to_string());
        }
        if self.output.nodes_file == self.output.edges_file {
            errors.push(format!(
                "[output] nodes_file and edges_file are both '{}'",
                self.output.nodes_file
            ));
        }

        errors
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            nodes: self.output.dir.join(&self.output.nodes_file),
            edges: self.output.dir.join(&self.output.edges_file),
        }
    }

    pub fn transform_config(&self) -> TransformConfig {
        let dir = &self.input.dir;
        let defaults_links = LinkFiles::in_dir(dir);
        let defaults_lookups = LookupPaths::in_dir(dir);
        let pick = |custom: &Option<PathBuf>, default: PathBuf| match custom {
            Some(p) => dir.join(p),
            None => default,
        };

        let input = &self.input;
        TransformConfig::from_dirs(dir, &self.output.dir)
            .with_links(LinkFiles {
                pathway_compound: pick(&input.pathway_compound, defaults_links.pathway_compound),
                reaction_compound: pick(&input.reaction_compound, defaults_links.reaction_compound),
                pathway_reaction: pick(&input.pathway_reaction, defaults_links.pathway_reaction),
                pathway_orthology: pick(&input.pathway_orthology, defaults_links.pathway_orthology),
                reaction_orthology: pick(&input.reaction_orthology, defaults_links.reaction_orthology),
            })
            .with_lookups(LookupPaths {
                compound: pick(&input.compound_list, defaults_lookups.compound),
                reaction: pick(&input.reaction_list, defaults_lookups.reaction),
                pathway: pick(&input.pathway_list, defaults_lookups.pathway),
                orthology: pick(&input.orthology_list, defaults_lookups.orthology),
            })
            .with_output(self.output_paths())
            .with_on_missing(self.transform.on_missing)
    }
}
