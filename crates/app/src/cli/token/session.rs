use backstage_app::auth::{StoreTokensService, TokensService};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct SessionTokenArgs {
    /// Login of the user the token is issued for
    #[arg(long)]
    login: String,
}

pub(crate) async fn run(service: &StoreTokensService, args: SessionTokenArgs) -> Result<(), String> {
    let issued = service
        .issue_session_token(&args.login)
        .await
        .map_err(|error| format!("failed to issue session token: {error}"))?;

    println!("login: {}", issued.subject);
    println!("token: {}", issued.token);

    Ok(())
}
