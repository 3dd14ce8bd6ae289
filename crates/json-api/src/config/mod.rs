//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    backstage::BackstageConfig, db::DatabaseConfig, logging::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod backstage;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;

/// Backstage JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "backstage-json", about = "Backstage JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Caller allow-list and token lifetime settings.
    #[command(flatten)]
    pub backstage: BackstageConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}
