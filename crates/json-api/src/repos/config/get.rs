//! Get Config Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::configs_status_error,
    extensions::*,
    repos::{config::ConfigResponse, repo_ref},
};

/// Get Config Handler
///
/// Returns the repository's current configuration.
#[endpoint(
    tags("repos"),
    summary = "Get Config",
    responses(
        (status_code = StatusCode::OK, description = "Current configuration"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown repository or no configuration"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<String>,
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ConfigResponse>, StatusError> {
    let state = depot.backstage_state()?;
    let repo = repo_ref(owner.into_inner(), name.into_inner())?;

    let config = state
        .app
        .configs
        .get_config(repo)
        .await
        .map_err(configs_status_error)?;

    Ok(Json(config.into()))
}
