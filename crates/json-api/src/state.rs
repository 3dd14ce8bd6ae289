//! State

use std::sync::Arc;

use backstage_app::{context::AppContext, gate::AccessGate};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) gate: AccessGate,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, gate: AccessGate) -> Self {
        Self { app, gate }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, gate: AccessGate) -> Arc<Self> {
        Arc::new(Self::new(app, gate))
    }
}
