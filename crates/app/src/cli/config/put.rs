use std::path::PathBuf;

use backstage_app::domain::{
    configs::{ConfigsService, StoreConfigsService},
    repos::RepoRef,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct PutConfigArgs {
    /// Repository the configuration belongs to (`owner/name`)
    #[arg(long)]
    repo: RepoRef,

    /// File holding the raw configuration
    #[arg(long)]
    file: PathBuf,
}

pub(crate) async fn run(service: &StoreConfigsService, args: PutConfigArgs) -> Result<(), String> {
    let raw = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let config = service
        .upsert_config(args.repo, raw)
        .await
        .map_err(|error| format!("failed to store config: {error}"))?;

    println!("config_id: {}", config.id);
    println!("hash: {}", config.hash);

    Ok(())
}
