//! Server Config

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use clap::Args;
use jiff::SignedDuration;

/// Listener address and shutdown behaviour.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address the control-plane listens on
    #[arg(
        short = 'H',
        long,
        env = "SERVER_HOST",
        default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    )]
    pub host: IpAddr,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// How long in-flight requests may run after a shutdown signal (e.g. `30s`)
    #[arg(long, env = "SHUTDOWN_GRACE", default_value = "30s")]
    pub shutdown_grace: SignedDuration,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Grace period for draining connections; negative values mean none.
    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::try_from(self.shutdown_grace).unwrap_or(Duration::ZERO)
    }
}
