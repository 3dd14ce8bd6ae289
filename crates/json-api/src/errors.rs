//! Service error to HTTP status mapping

use std::error::Error;

use salvo::http::StatusError;
use tracing::error;

use backstage_app::{
    ErrorKind,
    auth::TokensServiceError,
    domain::configs::ConfigsServiceError,
};

/// Maps an error class onto the response. Only client-facing classes carry
/// a brief; internal failures are logged and answered with a bare 500.
fn status_error(kind: ErrorKind, error: &dyn Error) -> StatusError {
    match kind {
        ErrorKind::NotFound => StatusError::not_found(),
        ErrorKind::InvalidInput => StatusError::bad_request().brief(error.to_string()),
        ErrorKind::InvalidToken => StatusError::unauthorized().brief("Invalid token"),
        ErrorKind::Conflict => StatusError::conflict().brief(error.to_string()),
        ErrorKind::Internal => {
            error!(error = ?error, "control-plane request failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "passed directly to map_err"
)]
pub(crate) fn tokens_status_error(error: TokensServiceError) -> StatusError {
    status_error(error.kind(), &error)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "passed directly to map_err"
)]
pub(crate) fn configs_status_error(error: ConfigsServiceError) -> StatusError {
    status_error(error.kind(), &error)
}
