//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Access to the backstage state injected at the router root.
pub(crate) trait DepotExt {
    /// The shared [`State`], or a 500 when the router was built without it.
    fn backstage_state(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn backstage_state(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_ignored| {
            error!("backstage state was not injected into the depot");

            StatusError::internal_server_error()
        })
    }
}
