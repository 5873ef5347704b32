use crate::cli::{print_report_table, TransformArgs};
use crate::config::KeggConfig;
use anyhow::{Context, Result};
use kegg_core::{KeggTransform, MissingPolicy};
use std::time::Instant;
use tracing::info;

pub async fn run(args: TransformArgs, config: KeggConfig) -> Result<()> {
    ensure_valid(&config)?;

    let mut transform_config = config.transform_config();
    if let Some(policy) = args.on_missing.as_deref() {
        let policy = MissingPolicy::parse(policy)
            .with_context(|| format!("Unknown --on-missing value: {}", policy))?;
        transform_config = transform_config.with_on_missing(policy);
    }

    if !matches!(args.format.as_str(), "text" | "json") {
        anyhow::bail!("Unknown output format: {}", args.format);
    }

    let transform = KeggTransform::new(transform_config);
    let planned = transform.config();
    info!(
        "Transforming KEGG links into {} and {} (on_missing = {})",
        planned.output.nodes.display(),
        planned.output.edges.display(),
        planned.on_missing
    );

    let started = Instant::now();
    let report = tokio::task::spawn_blocking(move || transform.run())
        .await
        .context("Transform task failed")?
        .context("KEGG transform failed")?;
    info!("Transform finished in {:.2?}", started.elapsed());

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!();
            print_report_table(&report);
            println!();
        }
    }

    Ok(())
}

/// Refuse to start a run that would clobber its own output.
fn ensure_valid(config: &KeggConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_same_nodes_and_edges_file_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = KeggConfig::default()
            .with_overrides(Some(dir.path().to_path_buf()), Some(dir.path().join("out")));
        assert!(ensure_valid(&config).is_ok());

        config.output.edges_file = config.output.nodes_file.clone();
        let err = ensure_valid(&config).unwrap_err();
        assert!(err.to_string().contains("nodes_file and edges_file"));
    }

    #[tokio::test]
    async fn test_invalid_config_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let mut config = KeggConfig::default()
            .with_overrides(Some(dir.path().to_path_buf()), Some(out.clone()));
        config.output.edges_file = "graph.tsv".into();
        config.output.nodes_file = "graph.tsv".into();

        let args = TransformArgs {
            on_missing: None,
            format: "text".into(),
        };
        assert!(run(args, config).await.is_err());
        assert!(!PathBuf::from(&out).join("graph.tsv").exists());
    }
}
