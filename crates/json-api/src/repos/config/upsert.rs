//! Upsert Config Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use backstage_app::domain::configs::data::decode_config_payload;

use crate::{
    errors::configs_status_error,
    extensions::*,
    repos::{config::ConfigResponse, repo_ref},
};

/// Upsert Config Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertConfigRequest {
    /// Standard base64 encoding of the raw configuration
    pub data: String,
}

/// Upsert Config Handler
///
/// Creates the repository's configuration, or replaces the content of the
/// existing one.
#[endpoint(
    tags("repos"),
    summary = "Upsert Config",
    responses(
        (status_code = StatusCode::OK, description = "Stored configuration"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown repository"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent write"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<String>,
    name: PathParam<String>,
    json: JsonBody<UpsertConfigRequest>,
    depot: &mut Depot,
) -> Result<Json<ConfigResponse>, StatusError> {
    let state = depot.backstage_state()?;
    let repo = repo_ref(owner.into_inner(), name.into_inner())?;
    let raw = decode_config_payload(&json.into_inner().data).map_err(configs_status_error)?;

    let config = state
        .app
        .configs
        .upsert_config(repo, raw)
        .await
        .map_err(configs_status_error)?;

    Ok(Json(config.into()))
}
