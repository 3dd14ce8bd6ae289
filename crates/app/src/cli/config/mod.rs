use backstage_app::{database, domain::configs::StoreConfigsService};
use clap::{Args, Subcommand};

mod get;
mod put;

#[derive(Debug, Args)]
pub(crate) struct ConfigCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    Get(get::GetConfigArgs),
    Put(put::PutConfigArgs),
}

pub(crate) async fn run(command: ConfigCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "--database-url or DATABASE_URL is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = StoreConfigsService::from_pool(pool);

    match command.command {
        ConfigSubcommand::Get(args) => get::run(&service, args).await,
        ConfigSubcommand::Put(args) => put::run(&service, args).await,
    }
}
