use crate::cli::ConfigCommands;
use crate::config::KeggConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub async fn run(
    cmd: ConfigCommands,
    config_path: &Path,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    match cmd {
        ConfigCommands::Validate => validate(config_path, input_dir, output_dir),
        ConfigCommands::Show => show(config_path, input_dir, output_dir),
    }
}

fn validate(config_path: &Path, input_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    match KeggConfig::load(config_path) {
        Ok(config) => {
            let errors = config.with_overrides(input_dir, output_dir).validate();
            if errors.is_empty() {
                println!("✅ {} is valid.", config_path.display());
            } else {
                println!("❌ Validation errors in {}:", config_path.display());
                for e in &errors {
                    println!("  - {}", e);
                }
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("❌ Failed to parse {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn show(config_path: &Path, input_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let config = KeggConfig::load_or_default(config_path)?.with_overrides(input_dir, output_dir);
    match toml::to_string_pretty(&config) {
        Ok(s) => println!("{}", s),
        Err(e) => anyhow::bail!("Failed to serialize config: {}", e),
    }
    Ok(())
}
