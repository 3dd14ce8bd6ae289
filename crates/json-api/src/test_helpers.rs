//! Test helpers.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use salvo::{affix_state::inject, prelude::*};

use backstage_app::{
    TypedId,
    auth::MockTokensService,
    context::AppContext,
    database::MockStoreHealth,
    domain::configs::{MockConfigsService, records::ConfigRecord},
    gate::AccessGate,
};

use crate::{gate, state::State};

pub(crate) const ALLOWED_CALLER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)), 4321);

/// Pretends the request arrived from the wrapped address.
#[derive(Debug)]
pub(crate) struct FromCaller(pub(crate) SocketAddr);

#[salvo::handler]
impl FromCaller {
    async fn handle(&self, req: &mut Request) {
        *req.remote_addr_mut() = self.0.into();
    }
}

pub(crate) fn strict_tokens_mock() -> MockTokensService {
    let mut tokens = MockTokensService::new();

    tokens.expect_issue_session_token().never();
    tokens.expect_issue_hook_token().never();
    tokens.expect_verify_token().never();
    tokens.expect_authenticate().never();
    tokens.expect_git_token().never();

    tokens
}

pub(crate) fn strict_configs_mock() -> MockConfigsService {
    let mut configs = MockConfigsService::new();

    configs.expect_get_config().never();
    configs.expect_upsert_config().never();

    configs
}

pub(crate) fn healthy_store_mock() -> MockStoreHealth {
    let mut store = MockStoreHealth::new();

    store.expect_ping().returning(|| Ok(()));

    store
}

pub(crate) fn state_with_store(
    tokens: MockTokensService,
    configs: MockConfigsService,
    store: MockStoreHealth,
) -> Arc<State> {
    let app = AppContext {
        tokens: Arc::new(tokens),
        configs: Arc::new(configs),
        store: Arc::new(store),
    };

    State::from_app_context(app, AccessGate::new(ALLOWED_CALLER.ip()))
}

pub(crate) fn state_with(tokens: MockTokensService, configs: MockConfigsService) -> Arc<State> {
    state_with_store(tokens, configs, healthy_store_mock())
}

pub(crate) fn strict_state() -> Arc<State> {
    state_with(strict_tokens_mock(), strict_configs_mock())
}

/// Mounts `route` behind the gate, called from the allow-listed address.
pub(crate) fn backstage_service(
    tokens: MockTokensService,
    configs: MockConfigsService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(tokens, configs)))
            .hoop(FromCaller(ALLOWED_CALLER))
            .hoop(gate::handler)
            .push(route),
    )
}

pub(crate) fn make_config(data: &str) -> ConfigRecord {
    ConfigRecord {
        id: TypedId::from_i64(7),
        repo_id: TypedId::from_i64(3),
        data: data.as_bytes().to_vec(),
        hash: backstage_app::domain::configs::data::content_hash(data.as_bytes()),
    }
}
