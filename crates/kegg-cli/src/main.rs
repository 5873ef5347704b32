mod cli;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use config::KeggConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    match cli.command {
        Commands::Transform(args) => {
            let config = load_config(&cli.config, cli.input_dir, cli.output_dir)?;
            cli::transform::run(args, config).await
        }
        Commands::Doctor => {
            cli::doctor::run(load_config(&cli.config, cli.input_dir, cli.output_dir)?).await
        }
        Commands::Stats => {
            cli::stats::run(load_config(&cli.config, cli.input_dir, cli.output_dir)?).await
        }
        Commands::Config(cmd) => {
            cli::config_cmd::run(cmd, &cli.config, cli.input_dir, cli.output_dir).await
        }
    }
}

fn load_config(
    path: &Path,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<KeggConfig> {
    Ok(KeggConfig::load_or_default(path)?.with_overrides(input_dir, output_dir))
}
