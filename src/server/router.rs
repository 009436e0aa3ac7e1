use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::server::{
    controller::{
        auth::{callback, login, logout},
        dashboard::{dashboard, home, server},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/server/{id}", get(server))
}

/// Full application with state, sessions and request tracing applied.
pub fn app(state: AppState, session: SessionManagerLayer<MemoryStore>) -> Router {
    router()
        .with_state(state)
        .layer(session)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::SET_COOKIE, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::server::{
        controller::test::{app_state, body_text, location, UNREACHABLE_API_URL},
        startup::setup_session,
    };

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn test_app() -> Result<Router, crate::server::error::AppError> {
        Ok(app(app_state(UNREACHABLE_API_URL)?, setup_session()))
    }

    fn get_request(uri: &str) -> Result<Request<Body>, axum::http::Error> {
        Request::builder().uri(uri).body(Body::empty())
    }

    #[tokio::test]
    async fn home_renders_login_link() -> TestResult {
        let response = test_app()?.oneshot(get_request("/")?).await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("href=\"/login\""));

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_dashboard_redirects_home() -> TestResult {
        let response = test_app()?.oneshot(get_request("/dashboard")?).await?;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_server_redirects_to_login() -> TestResult {
        let response = test_app()?
            .oneshot(get_request("/server/81384788765712384")?)
            .await?;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/login"));

        Ok(())
    }

    #[tokio::test]
    async fn login_redirects_to_discord_and_sets_cookie() -> TestResult {
        let response = test_app()?.oneshot(get_request("/login")?).await?;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(response.headers().contains_key(SET_COOKIE));

        let target = url::Url::parse(location(&response).unwrap_or_default())?;
        let scope = target
            .query_pairs()
            .find(|(key, _)| key == "scope")
            .map(|(_, value)| value.into_owned());
        assert_eq!(target.host_str(), Some("discord.com"));
        assert_eq!(scope.as_deref(), Some("identify guilds"));

        Ok(())
    }

    #[tokio::test]
    async fn callback_without_session_redirects_home() -> TestResult {
        let response = test_app()?
            .oneshot(get_request("/callback?code=abc&state=xyz")?)
            .await?;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> TestResult {
        let response = test_app()?.oneshot(get_request("/admin")?).await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
