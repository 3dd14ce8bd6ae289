//! Repository configuration handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use backstage_app::domain::configs::{data::encode_config_payload, records::ConfigRecord};

pub(crate) mod get;
pub(crate) mod upsert;

/// Current configuration of a repository
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfigResponse {
    /// The configuration's identifier, stable across updates
    pub id: i64,

    /// The repository the configuration belongs to
    pub repo_id: i64,

    /// Standard base64 encoding of the raw configuration
    pub data: String,

    /// Lowercase hex SHA-256 of the raw configuration
    pub hash: String,
}

impl From<ConfigRecord> for ConfigResponse {
    fn from(config: ConfigRecord) -> Self {
        ConfigResponse {
            id: config.id.into_i64(),
            repo_id: config.repo_id.into_i64(),
            data: encode_config_payload(&config.data),
            hash: config.hash,
        }
    }
}
