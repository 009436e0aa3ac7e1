//! OAuth2 login with Discord

use crate::server::{service::discord::DiscordApiClient, state::OAuth2Client};

pub mod callback;
pub mod login;

/// Scopes requested on login: the user's profile and their guild list.
pub const OAUTH_SCOPES: [&str; 2] = ["identify", "guilds"];

pub struct DiscordAuthService<'a> {
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    pub discord_api: &'a DiscordApiClient,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        discord_api: &'a DiscordApiClient,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            discord_api,
        }
    }
}
