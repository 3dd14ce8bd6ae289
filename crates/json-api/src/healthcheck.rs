//! Backstage JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency answered, `unavailable` otherwise
    pub status: String,

    /// Whether the configuration and secret store answered a ping
    pub store: String,
}

/// Healthcheck handler
///
/// Pings the backing store. Answers 503 while the store is unreachable so
/// load balancers stop routing to this instance.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service and store are healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Store is unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.backstage_state()?;

    let store_ok = match state.app.store.ping().await {
        Ok(()) => true,
        Err(error) => {
            warn!("store ping failed: {error}");

            false
        }
    };

    if !store_ok {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    let label = if store_ok { "ok" } else { "unavailable" };

    Ok(Json(HealthResponse {
        status: label.to_string(),
        store: label.to_string(),
    }))
}
