use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    service::{
        discord::DiscordApiClient,
        guild::{GuildCache, GuildFetcher},
    },
    state::OAuth2Client,
};

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_level` applies.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Creates the session layer backed by an in-memory store.
///
/// Sessions expire after seven days of inactivity. Session data is lost on restart.
pub fn setup_session() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}

/// Builds the HTTP client used for Discord calls.
///
/// Redirects are disabled so a response can never bounce a bearer token to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client from configuration.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorize, token and redirect URLs set
/// - `Err(AppError::UrlErr(_))` - One of the configured URLs is not a valid URL
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(AuthUrl::new(config.discord_auth_url.clone())?)
        .set_token_uri(TokenUrl::new(config.discord_token_url.clone())?)
        .set_redirect_uri(RedirectUrl::new(config.discord_callback_url.clone())?);

    Ok(client)
}

/// Builds the guild cache over the Discord REST client with the default backoff policy.
pub fn setup_guild_cache(config: &Config, discord_api: &DiscordApiClient) -> GuildCache {
    let fetcher = GuildFetcher::new(Arc::new(discord_api.clone()));

    GuildCache::new(fetcher, config.guild_cache_capacity)
}
