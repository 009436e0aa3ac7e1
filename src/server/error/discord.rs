use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Errors from Discord's REST API.
#[derive(Error, Debug)]
pub enum DiscordApiError {
    /// Discord answered with HTTP 429.
    ///
    /// Transient. The guild fetcher retries these until its budget runs out.
    #[error("Rate limited by Discord (retry after {retry_after:?})")]
    RateLimited {
        /// Wait advertised by the `retry-after` header, if present and parseable
        retry_after: Option<Duration>,
    },

    /// Every attempt, including all retries, was rate limited.
    #[error("Persistent rate limit after {attempts} attempts")]
    PersistentRateLimit {
        /// Number of remote calls that were made
        attempts: u32,
    },

    /// Discord answered with a non-success status other than 429.
    #[error("Discord API returned {status}: {body}")]
    Remote { status: StatusCode, body: String },

    /// The request could not be sent or the response body could not be decoded.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
