use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message returned for every guild authorization failure.
pub const GUILD_ACCESS_DENIED_MESSAGE: &str =
    "You do not have administrative permissions in this guild, or the guild does not exist.";

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Exchanging the authorization code for an access token failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// No authenticated user is stored in the session.
    #[error("No user found in session")]
    UserNotInSession,

    /// The requested guild is not in the user's guild list.
    #[error("User {user_id} requested guild {guild_id} which is not in their guild list")]
    GuildNotFound { user_id: String, guild_id: String },

    /// The user is a member of the guild but lacks the administrator bit.
    #[error("User {user_id} lacks administrator permission in guild {guild_id}")]
    MissingAdministrator { user_id: String, guild_id: String },
}

impl AuthError {
    /// Whether this error denies access to a specific guild.
    ///
    /// Both guild variants render the same 403 page so callers cannot tell a missing guild
    /// from one without administrator rights.
    pub fn is_guild_access_denied(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound { .. } | Self::MissingAdministrator { .. }
        )
    }
}

/// Converts authentication errors into HTTP responses.
///
/// - `CsrfValidationFailed` / `TokenExchange` → 400 Bad Request with a generic login message
/// - `UserNotInSession` → 401 Unauthorized
/// - `GuildNotFound` / `MissingAdministrator` → 403 Forbidden with one shared message
///
/// The underlying cause is logged at debug level while the client-facing message stays
/// generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            )
                .into_response(),
            Self::UserNotInSession => {
                (StatusCode::UNAUTHORIZED, "You are not logged in.").into_response()
            }
            Self::GuildNotFound { .. } | Self::MissingAdministrator { .. } => {
                (StatusCode::FORBIDDEN, GUILD_ACCESS_DENIED_MESSAGE).into_response()
            }
        }
    }
}
