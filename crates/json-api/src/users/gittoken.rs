//! Git Credential Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::tokens_status_error, extensions::*, users::UserTokenResponse};

/// Git Credential Handler
///
/// Returns the user's externally issued git credential.
#[endpoint(
    tags("users"),
    summary = "Get Git Credential",
    responses(
        (status_code = StatusCode::OK, description = "Git credential"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    login: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<UserTokenResponse>, StatusError> {
    let state = depot.backstage_state()?;
    let login = login.into_inner();

    let token = state
        .app
        .tokens
        .git_token(&login)
        .await
        .map_err(tokens_status_error)?;

    Ok(Json(UserTokenResponse { login, token }))
}
