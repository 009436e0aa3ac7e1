//! Scripted mock of the Discord endpoints used during login and guild lookups.
//!
//! Guild-list responses are replayed in the order they were scripted, one per request. Once
//! the script runs out every further request receives a 500 so unexpected extra calls fail
//! loudly. The token endpoint always grants [`MOCK_ACCESS_TOKEN`] and `/users/@me` serves the
//! configured user, or 401 when none was set.

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, RETRY_AFTER},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::task::JoinHandle;

use crate::error::TestError;

/// Access token granted by the mock token endpoint for any authorization code.
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// A single scripted response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code to answer with.
    pub status: u16,
    /// Raw `retry-after` header value, if any.
    pub retry_after: Option<String>,
    /// JSON body.
    pub body: serde_json::Value,
}

impl MockResponse {
    /// 200 OK with the given JSON body.
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            retry_after: None,
            body,
        }
    }

    /// 429 Too Many Requests with an optional `retry-after` header.
    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        Self {
            status: 429,
            retry_after: retry_after.map(str::to_string),
            body: serde_json::json!({
                "message": "You are being rate limited.",
                "retry_after": 0.0,
                "global": false
            }),
        }
    }

    /// Arbitrary status with a Discord style error body.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            retry_after: None,
            body: serde_json::json!({ "message": message, "code": 0 }),
        }
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.body)).into_response();

        if let Some(value) = self.retry_after.and_then(|v| HeaderValue::from_str(&v).ok()) {
            response.headers_mut().insert(RETRY_AFTER, value);
        }

        response
    }
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    authorizations: Arc<Mutex<Vec<String>>>,
    current_user: Option<serde_json::Value>,
}

/// Local HTTP server standing in for `https://discord.com/api/v10`.
///
/// The server task is aborted when this value is dropped.
pub struct MockDiscordServer {
    addr: SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockDiscordServer {
    /// Binds to an ephemeral local port and starts replaying `responses`.
    ///
    /// `current_user` is the body served by `GET /users/@me`.
    ///
    /// # Returns
    /// - `Ok(MockDiscordServer)` - Server is accepting connections
    /// - `Err(TestError::Io)` - Failed to bind the listener
    pub async fn start(
        responses: Vec<MockResponse>,
        current_user: Option<serde_json::Value>,
    ) -> Result<Self, TestError> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = MockState {
            responses: Arc::new(Mutex::new(responses.into())),
            authorizations: Arc::default(),
            current_user,
        };

        let app = Router::new()
            .route("/oauth2/token", post(token))
            .route("/users/@me", get(self::current_user))
            .route("/users/@me/guilds", get(guilds))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL to hand to the Discord client under test. The token endpoint is
    /// `{api_url}/oauth2/token`.
    pub fn api_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of guild-list requests received so far.
    pub fn request_count(&self) -> usize {
        self.state
            .authorizations
            .lock()
            .map(|a| a.len())
            .unwrap_or_default()
    }

    /// `Authorization` header values of every guild-list request received, in order.
    pub fn authorizations(&self) -> Vec<String> {
        self.state
            .authorizations
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }
}

impl Drop for MockDiscordServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn guilds(State(state): State<MockState>, headers: HeaderMap) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if let Ok(mut authorizations) = state.authorizations.lock() {
        authorizations.push(authorization);
    }

    let next = state
        .responses
        .lock()
        .ok()
        .and_then(|mut responses| responses.pop_front());

    match next {
        Some(response) => response.into_response(),
        None => MockResponse::error(500, "no scripted response left").into_response(),
    }
}

async fn token() -> Response {
    Json(serde_json::json!({
        "access_token": MOCK_ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 604800,
        "refresh_token": "mock-refresh-token",
        "scope": "identify guilds"
    }))
    .into_response()
}

async fn current_user(State(state): State<MockState>) -> Response {
    match state.current_user {
        Some(user) => Json(user).into_response(),
        None => MockResponse::error(401, "401: Unauthorized").into_response(),
    }
}
