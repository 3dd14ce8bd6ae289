use backstage_app::{
    auth::{StoreTokensService, TokensService},
    domain::repos::RepoRef,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct HookTokenArgs {
    /// Repository the token is scoped to (`owner/name`)
    #[arg(long)]
    repo: RepoRef,
}

pub(crate) async fn run(service: &StoreTokensService, args: HookTokenArgs) -> Result<(), String> {
    let issued = service
        .issue_hook_token(&args.repo.owner, &args.repo.name)
        .await
        .map_err(|error| format!("failed to issue hook token: {error}"))?;

    println!("repo: {}", issued.subject);
    println!("token: {}", issued.token);

    Ok(())
}
