use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serenity::all::User as DiscordUser;
use std::time::Duration;

use crate::{model::discord::DiscordGuild, server::error::discord::DiscordApiError};

/// Single remote call listing the guilds of the token's owner.
///
/// One call, no retries. Rate limiting is reported as [`DiscordApiError::RateLimited`] and
/// handled by `GuildFetcher`.
#[async_trait]
pub trait GuildListApi: Send + Sync {
    async fn list_guilds(&self, access_token: &str) -> Result<Vec<DiscordGuild>, DiscordApiError>;
}

/// Discord REST client using a user's OAuth2 bearer token.
#[derive(Clone)]
pub struct DiscordApiClient {
    http_client: reqwest::Client,
    /// Base URL including the API version, e.g. `https://discord.com/api/v10`.
    api_url: String,
}

impl DiscordApiClient {
    pub fn new(http_client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Retrieves the Discord user owning the provided access token.
    pub async fn current_user(&self, access_token: &str) -> Result<DiscordUser, DiscordApiError> {
        let user = self
            .get("/users/@me", access_token)
            .await?
            .json::<DiscordUser>()
            .await?;

        Ok(user)
    }

    /// Sends an authenticated GET request and maps non-success statuses to errors.
    ///
    /// # Returns
    /// - `Ok(Response)` - 2xx response, body not yet consumed
    /// - `Err(DiscordApiError::RateLimited)` - HTTP 429, with the `retry-after` wait if sent
    /// - `Err(DiscordApiError::Remote)` - Any other non-success status
    /// - `Err(DiscordApiError::Request)` - Request could not be sent
    async fn get(&self, path: &str, access_token: &str) -> Result<reqwest::Response, DiscordApiError> {
        let response = self
            .http_client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DiscordApiError::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiscordApiError::Remote { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl GuildListApi for DiscordApiClient {
    async fn list_guilds(&self, access_token: &str) -> Result<Vec<DiscordGuild>, DiscordApiError> {
        let guilds = self
            .get("/users/@me/guilds", access_token)
            .await?
            .json::<Vec<DiscordGuild>>()
            .await?;

        Ok(guilds)
    }
}

/// Reads the `retry-after` header as whole seconds.
///
/// Fractional values are truncated. Unparseable or negative values count as absent.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let seconds = headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)?;

    Some(Duration::from_secs(seconds.trunc() as u64))
}

