use backstage_app::{
    auth::{StoreTokensService, TokenSettings},
    database,
};
use clap::{Args, Subcommand};
use jiff::SignedDuration;

mod hook;
mod session;
mod verify;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    /// Session token lifetime (e.g. `72h`)
    #[arg(long, env = "SESSION_EXPIRES", default_value = "72h", global = true)]
    session_expires: SignedDuration,

    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Session(session::SessionTokenArgs),
    Hook(hook::HookTokenArgs),
    Verify(verify::VerifyTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "--database-url or DATABASE_URL is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = StoreTokensService::from_pool(
        pool,
        TokenSettings {
            session_ttl: command.session_expires,
        },
    );

    match command.command {
        TokenSubcommand::Session(args) => session::run(&service, args).await,
        TokenSubcommand::Hook(args) => hook::run(&service, args).await,
        TokenSubcommand::Verify(args) => verify::run(&service, args).await,
    }
}
