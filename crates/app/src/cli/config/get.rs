use std::io::{self, Write as _};

use backstage_app::domain::{
    configs::{ConfigsService, StoreConfigsService},
    repos::RepoRef,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct GetConfigArgs {
    /// Repository whose configuration to print (`owner/name`)
    #[arg(long)]
    repo: RepoRef,
}

pub(crate) async fn run(service: &StoreConfigsService, args: GetConfigArgs) -> Result<(), String> {
    let config = service
        .get_config(args.repo)
        .await
        .map_err(|error| format!("failed to load config: {error}"))?;

    println!("config_id: {}", config.id);
    println!("repo_id: {}", config.repo_id);
    println!("hash: {}", config.hash);
    println!();

    io::stdout()
        .write_all(&config.data)
        .map_err(|error| format!("failed to write config: {error}"))?;

    Ok(())
}
