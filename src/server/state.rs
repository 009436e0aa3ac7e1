//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - HTTP client for external API requests
//! - OAuth2 client for Discord authentication
//! - Discord REST client for user profile lookups
//! - Guild cache shared by every route that needs guild data
//! - Compiled HTML views

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};

use crate::server::{
    service::{discord::DiscordApiClient, guild::GuildCache},
    view::Views,
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - `DiscordApiClient` wraps the same `reqwest::Client`
/// - `GuildCache` and `Views` share their contents through `Arc`
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for making external API requests.
    ///
    /// Configured with no redirects. Used for the OAuth token exchange and Discord API calls.
    pub http_client: reqwest::Client,

    /// OAuth2 client for Discord authentication flow.
    pub oauth_client: OAuth2Client,

    /// Discord REST client used after login to load the user profile.
    pub discord_api: DiscordApiClient,

    /// Guild lists keyed by the user's access token.
    pub guild_cache: GuildCache,

    /// Compiled page templates.
    pub views: Views,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `http_client` - HTTP client for external API requests
    /// - `oauth_client` - OAuth2 client for Discord authentication
    /// - `discord_api` - Discord REST client
    /// - `guild_cache` - Shared guild list cache
    /// - `views` - Compiled page templates
    pub fn new(
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_api: DiscordApiClient,
        guild_cache: GuildCache,
        views: Views,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            discord_api,
            guild_cache,
            views,
        }
    }
}
