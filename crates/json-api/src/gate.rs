//! Access gate middleware.

use std::net::SocketAddr;

use salvo::prelude::*;
use tracing::warn;

use crate::extensions::*;

/// Renders a plain 404 for every caller other than the allow-listed one, so
/// the control-plane never confirms that its routes exist.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.backstage_state() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let admitted = caller_addr(req).is_some_and(|caller| state.gate.admit_addr(caller));

    if !admitted {
        warn!(
            remote_addr = %req.remote_addr(),
            allowed = %state.gate.allowed(),
            "refused caller outside the allow-list"
        );

        res.render(StatusError::not_found());

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn caller_addr(req: &Request) -> Option<SocketAddr> {
    let remote = req.remote_addr();

    remote
        .as_ipv4()
        .map(|addr| SocketAddr::V4(*addr))
        .or_else(|| remote.as_ipv6().map(|addr| SocketAddr::V6(*addr)))
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use salvo::{affix_state::inject, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{ALLOWED_CALLER, FromCaller, strict_state};

    use super::*;

    #[salvo::handler]
    async fn admitted() -> &'static str {
        "admitted"
    }

    fn make_service(caller: Option<SocketAddr>) -> Service {
        let mut router = Router::new().hoop(inject(strict_state()));

        if let Some(caller) = caller {
            router = router.hoop(FromCaller(caller));
        }

        Service::new(router.hoop(handler).get(admitted))
    }

    #[tokio::test]
    async fn test_allowed_caller_reaches_route() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(ALLOWED_CALLER)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_allowed_host_on_another_port_is_admitted() -> TestResult {
        let caller = SocketAddr::new(ALLOWED_CALLER.ip(), 60_000);

        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(caller)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_caller_gets_404() -> TestResult {
        let caller = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 50)), 4321);

        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(caller)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_remote_addr_gets_404() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(None))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_ipv4_mapped_allowed_caller_is_admitted() -> TestResult {
        let mapped = Ipv4Addr::new(10, 0, 0, 5).to_ipv6_mapped();
        let caller = SocketAddr::new(IpAddr::V6(mapped), 4321);

        let res = TestClient::get("http://example.com")
            .send(&make_service(Some(caller)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
