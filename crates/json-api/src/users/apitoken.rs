//! Issue Session Token Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{errors::tokens_status_error, extensions::*, users::UserTokenResponse};

/// Issue Session Token Handler
///
/// Returns an expiring session token signed with the user's current secret.
#[endpoint(
    tags("users"),
    summary = "Issue Session Token",
    responses(
        (status_code = StatusCode::OK, description = "Session token issued"),
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

    let issued = state
        .app
        .tokens
        .issue_session_token(&login)
        .await
        .map_err(tokens_status_error)?;

    Ok(Json(UserTokenResponse {
        login: issued.subject,
        token: issued.token,
    }))
}
