//! Guild list retrieval with rate-limit aware retries.
//!
//! Discord answers bursts of guild-list requests with HTTP 429. The fetcher waits for the
//! server-advertised `retry-after` when present and falls back to its own delay otherwise.
//! Each retry doubles the wait that was actually used, so consecutive 429s keep growing even
//! when Discord supplies the hint.

use std::{sync::Arc, time::Duration};

use crate::{
    model::discord::DiscordGuild,
    server::{error::discord::DiscordApiError, service::discord::GuildListApi},
};

/// Number of retries after the first rate-limited attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Wait before the first retry when Discord sends no `retry-after`.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Fetches a user's guild list, retrying with exponential backoff on HTTP 429.
#[derive(Clone)]
pub struct GuildFetcher {
    api: Arc<dyn GuildListApi>,
    max_retries: u32,
    initial_delay: Duration,
}

impl GuildFetcher {
    /// Creates a fetcher with the default retry budget and initial delay.
    pub fn new(api: Arc<dyn GuildListApi>) -> Self {
        Self {
            api,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }

    /// Overrides the retry budget and the initial backoff delay.
    pub fn with_backoff(mut self, max_retries: u32, initial_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_delay = initial_delay;
        self
    }

    /// Fetches the guild list for `access_token`.
    ///
    /// On HTTP 429 waits `retry-after` (or the current delay when absent), doubles that wait
    /// for the next round and tries again while retries remain. Any other failure is returned
    /// immediately. At most `max_retries + 1` remote calls are made.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 bearer token of the user
    ///
    /// # Returns
    /// - `Ok(Vec<DiscordGuild>)` - Guild list in Discord's order
    /// - `Err(DiscordApiError::PersistentRateLimit)` - Every attempt was rate limited
    /// - `Err(DiscordApiError::Remote)` / `Err(DiscordApiError::Request)` - Non-retryable failure
    pub async fn fetch(&self, access_token: &str) -> Result<Vec<DiscordGuild>, DiscordApiError> {
        let mut retries = self.max_retries;
        let mut delay = self.initial_delay;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            match self.api.list_guilds(access_token).await {
                Ok(guilds) => return Ok(guilds),
                Err(DiscordApiError::RateLimited { retry_after }) => {
                    let wait = retry_after.unwrap_or(delay);

                    if retries == 0 {
                        tracing::warn!(
                            "Guild list still rate limited after {} attempts, giving up",
                            attempts
                        );
                        return Err(DiscordApiError::PersistentRateLimit { attempts });
                    }

                    tracing::warn!(
                        "Rate limited fetching guilds, waiting {:.3}s ({} retries left)",
                        wait.as_secs_f64(),
                        retries
                    );
                    tokio::time::sleep(wait).await;

                    retries -= 1;
                    delay = wait.saturating_mul(2);
                }
                Err(err) => {
                    tracing::error!("Failed to fetch guild list: {}", err);
                    return Err(err);
                }
            }
        }
    }
}
