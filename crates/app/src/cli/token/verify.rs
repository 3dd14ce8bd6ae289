use backstage_app::auth::{StoreTokensService, TokensService};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct VerifyTokenArgs {
    /// Token to verify against its subject's current secret
    #[arg(long, env = "BACKSTAGE_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(service: &StoreTokensService, args: VerifyTokenArgs) -> Result<(), String> {
    let verified = service
        .authenticate(&args.token)
        .await
        .map_err(|error| format!("token rejected: {error}"))?;

    println!("kind: {}", verified.kind);
    println!("subject: {}", verified.subject);
    println!(
        "expires_at: {}",
        verified
            .expires_at
            .map_or_else(|| "never".to_string(), |value| value.to_string())
    );

    Ok(())
}
