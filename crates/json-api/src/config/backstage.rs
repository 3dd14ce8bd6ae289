//! Backstage Config

use std::net::IpAddr;

use backstage_app::{auth::TokenSettings, gate::AccessGate};
use clap::Args;
use jiff::SignedDuration;

/// Caller allow-list and token lifetime settings.
#[derive(Debug, Args)]
pub struct BackstageConfig {
    /// The only caller address admitted to the control-plane routes
    #[arg(long, env = "BACKSTAGE_ALLOWED_ADDR")]
    pub allowed_addr: IpAddr,

    /// Session token lifetime (e.g. `72h`, `90m`)
    #[arg(long, env = "SESSION_EXPIRES", default_value = "72h")]
    pub session_expires: SignedDuration,
}

impl BackstageConfig {
    /// Gate admitting only the configured caller.
    #[must_use]
    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.allowed_addr)
    }

    /// Token lifetimes handed to the token service.
    #[must_use]
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            session_ttl: self.session_expires,
        }
    }
}
