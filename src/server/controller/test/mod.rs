use axum::{body::to_bytes, http::header::LOCATION, response::Response};

use crate::{
    model::user::SessionUser,
    server::{
        config::Config,
        error::AppError,
        service::discord::DiscordApiClient,
        startup::{setup_guild_cache, setup_oauth_client, setup_reqwest_client},
        state::AppState,
        view::Views,
    },
};


/// Address nothing listens on, for tests that must not reach Discord.
pub(crate) const UNREACHABLE_API_URL: &str = "http://127.0.0.1:9/api/v10";

/// Configuration with the Discord API and token endpoint rooted at `api_url`.
pub(crate) fn test_config(api_url: &str) -> Config {
    Config {
        discord_client_id: "client-id".to_string(),
        discord_client_secret: "client-secret".to_string(),
        discord_callback_url: "http://localhost:3000/callback".to_string(),
        discord_auth_url: "https://discord.com/oauth2/authorize".to_string(),
        discord_token_url: format!("{}/oauth2/token", api_url),
        discord_api_url: api_url.to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        guild_cache_capacity: 16,
    }
}

/// Application state wired against the given Discord API base URL.
pub(crate) fn app_state(api_url: &str) -> Result<AppState, AppError> {
    let config = test_config(api_url);
    let http_client = setup_reqwest_client()?;
    let oauth_client = setup_oauth_client(&config)?;
    let discord_api = DiscordApiClient::new(http_client.clone(), &config.discord_api_url);
    let guild_cache = setup_guild_cache(&config, &discord_api);

    Ok(AppState::new(
        http_client,
        oauth_client,
        discord_api,
        guild_cache,
        Views::new()?,
    ))
}

pub(crate) fn session_user() -> SessionUser {
    SessionUser {
        id: "80351110224678912".to_string(),
        username: "nelly".to_string(),
        avatar: Some("8342729096ea3675442027381ff50dfe".to_string()),
        access_token: "user-access-token".to_string(),
    }
}

pub(crate) fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub(crate) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
