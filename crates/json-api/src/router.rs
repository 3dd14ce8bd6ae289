//! App Router

use salvo::{
    Router,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
};

use crate::{gate, healthcheck, repos, tokens, users};

/// Routes served by the JSON API. Everything under `backstage` sits behind
/// the access gate; the healthcheck does not.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("backstage")
                .hoop(gate::handler)
                .push(
                    Router::with_path("users/{login}")
                        .push(Router::with_path("apitoken").get(users::apitoken::handler))
                        .push(Router::with_path("gittoken").get(users::gittoken::handler)),
                )
                .push(
                    Router::with_path("repos/{owner}/{name}")
                        .push(Router::with_path("hooktoken").get(repos::hooktoken::handler))
                        .push(
                            Router::with_path("config")
                                .get(repos::config::get::handler)
                                .post(repos::config::upsert::handler),
                        ),
                )
                .push(Router::with_path("tokens/verify").post(tokens::verify::handler)),
        )
}

/// Adds the OpenAPI document and Swagger UI for `router`. Both describe the
/// gated control-plane, so they sit behind the gate as well.
pub(crate) fn with_api_docs(router: Router) -> Router {
    let doc = OpenApi::new("Backstage API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router.push(
        Router::new()
            .hoop(gate::handler)
            .push(doc.into_router("/api-doc/openapi.json"))
            .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs")),
    )
}

#[cfg(test)]
mod tests {
    use backstage_app::auth::{IssuedToken, MockTokensService, TokenKind};
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        test_helpers::{ALLOWED_CALLER, FromCaller, state_with, strict_configs_mock, strict_state},
        users::UserTokenResponse,
    };

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_is_not_gated() -> TestResult {
        let service = Service::new(Router::new().hoop(inject(strict_state())).push(app_router()));

        let res = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_backstage_routes_hidden_from_unlisted_callers() -> TestResult {
        let service = Service::new(Router::new().hoop(inject(strict_state())).push(app_router()));

        for url in [
            "http://example.com/backstage/users/octocat/apitoken",
            "http://example.com/backstage/repos/octocat/hello-world/config",
        ] {
            let res = TestClient::get(url).send(&service).await;

            assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "{url}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_allowed_caller_reaches_token_issuance() -> TestResult {
        let mut tokens = MockTokensService::new();

        tokens.expect_issue_session_token().once().return_once(|login| {
            Ok(IssuedToken {
                kind: TokenKind::Session,
                subject: login.to_string(),
                token: "signed.token".to_string(),
            })
        });

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with(tokens, strict_configs_mock())))
                .hoop(FromCaller(ALLOWED_CALLER))
                .push(app_router()),
        );

        let response: UserTokenResponse =
            TestClient::get("http://example.com/backstage/users/octocat/apitoken")
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(response.login, "octocat");

        Ok(())
    }

    #[tokio::test]
    async fn test_api_docs_hidden_from_unlisted_callers() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(strict_state()))
                .push(with_api_docs(app_router())),
        );

        for url in [
            "http://example.com/api-doc/openapi.json",
            "http://example.com/docs",
        ] {
            let res = TestClient::get(url).send(&service).await;

            assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "{url}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_api_docs_served_to_allowed_caller() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(strict_state()))
                .hoop(FromCaller(ALLOWED_CALLER))
                .push(with_api_docs(app_router())),
        );

        let mut res = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let doc = res.take_string().await?;

        assert!(
            doc.contains("/backstage/users/{login}/apitoken"),
            "document should describe the gated routes"
        );

        Ok(())
    }
}
