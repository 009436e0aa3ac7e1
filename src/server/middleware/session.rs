//! Type-safe session management wrappers.
//!
//! This module provides type-safe interfaces for managing different aspects of user sessions,
//! organized by concern. Each struct handles a specific domain of session data, preventing
//! typos, ensuring type consistency, and centralizing session-related logic.
//!
//! # Architecture
//!
//! Session management is split into focused concerns:
//! - `AuthSession` - Authenticated user (profile and access token) and their admin guilds
//! - `CsrfSession` - CSRF token management for OAuth flows
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods
//! relevant to its concern.

use tower_sessions::Session;

use crate::{
    model::{discord::DiscordGuild, user::SessionUser},
    server::error::AppError,
};

// Session key constants
const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_ADMIN_GUILDS: &str = "adminGuilds";

/// Authentication session management.
///
/// Handles the logged-in user, including the OAuth access token used for Discord calls,
/// and the admin guild list captured at login.
pub struct AuthSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    /// Creates a new AuthSession wrapper.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the authenticated user in the session.
    ///
    /// Called after a successful OAuth callback to establish a logged-in session.
    ///
    /// # Returns
    /// - `Ok(())` - User successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user(&self, user: &SessionUser) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    /// Retrieves the authenticated user from the session.
    ///
    /// # Returns
    /// - `Ok(Some(user))` - User is logged in
    /// - `Ok(None)` - No user in session (not logged in)
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user(&self) -> Result<Option<SessionUser>, AppError> {
        let user = self.session.get::<SessionUser>(SESSION_AUTH_USER).await?;
        Ok(user)
    }

    /// Checks if a user is currently logged in.
    #[cfg(test)]
    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.get_user().await?.is_some())
    }

    /// Stores the guilds the user administers.
    pub async fn set_admin_guilds(&self, guilds: &[DiscordGuild]) -> Result<(), AppError> {
        self.session.insert(SESSION_ADMIN_GUILDS, guilds).await?;
        Ok(())
    }

    /// Retrieves the stored admin guilds, empty if none were stored.
    #[cfg(test)]
    pub async fn get_admin_guilds(&self) -> Result<Vec<DiscordGuild>, AppError> {
        let guilds = self
            .session
            .get::<Vec<DiscordGuild>>(SESSION_ADMIN_GUILDS)
            .await?
            .unwrap_or_default();
        Ok(guilds)
    }

    /// Issues a new session ID, keeping the data.
    ///
    /// Called on login so a session ID seen before authentication cannot be reused after it.
    pub async fn cycle_id(&self) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        Ok(())
    }

    /// Clears all data from the session.
    ///
    /// Used during logout to remove all session data including authentication
    /// state and any temporary OAuth flow data.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// Handles CSRF token storage and validation for OAuth flows. Tokens are stored
/// during login initiation and validated during the OAuth callback.
pub struct CsrfSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    /// Creates a new CsrfSession wrapper.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores a CSRF token in the session.
    ///
    /// # Returns
    /// - `Ok(())` - Token successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token from the session.
    ///
    /// The token is removed to prevent replay attacks - each token can only be used once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - CSRF token was found and removed
    /// - `Ok(None)` - No CSRF token in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::context::TestContext;

    fn user() -> SessionUser {
        SessionUser {
            id: "1001".to_string(),
            username: "tester".to_string(),
            avatar: Some("a_hash".to_string()),
            access_token: "token".to_string(),
        }
    }

    /// Tests storing and reading the authenticated user.
    ///
    /// Expected: Ok with the same user, authenticated afterwards
    #[tokio::test]
    async fn stores_and_reads_user() -> Result<(), AppError> {
        let mut test = TestContext::new();
        let auth = AuthSession::new(test.session());

        assert!(!auth.is_authenticated().await?);

        auth.set_user(&user()).await?;

        assert_eq!(auth.get_user().await?, Some(user()));
        assert!(auth.is_authenticated().await?);

        Ok(())
    }

    /// Tests the admin guild list round trip and its empty default.
    ///
    /// Expected: empty before storing, stored list afterwards
    #[tokio::test]
    async fn stores_admin_guilds() -> Result<(), AppError> {
        let mut test = TestContext::new();
        let auth = AuthSession::new(test.session());

        assert!(auth.get_admin_guilds().await?.is_empty());

        let guilds = vec![DiscordGuild {
            id: "1".to_string(),
            name: "Guild".to_string(),
            icon: None,
            permissions: 8,
        }];
        auth.set_admin_guilds(&guilds).await?;

        assert_eq!(auth.get_admin_guilds().await?, guilds);

        Ok(())
    }

    /// Tests clearing the session logs the user out.
    ///
    /// Expected: no user after clear
    #[tokio::test]
    async fn clear_logs_out() -> Result<(), AppError> {
        let mut test = TestContext::new();
        let auth = AuthSession::new(test.session());

        auth.set_user(&user()).await?;
        auth.clear().await;

        assert_eq!(auth.get_user().await?, None);

        Ok(())
    }

    /// Tests CSRF tokens can only be taken once.
    ///
    /// Expected: token on first take, None on second
    #[tokio::test]
    async fn csrf_token_is_single_use() -> Result<(), AppError> {
        let mut test = TestContext::new();
        let csrf = CsrfSession::new(test.session());

        csrf.set_token("state-123".to_string()).await?;

        assert_eq!(csrf.take_token().await?, Some("state-123".to_string()));
        assert_eq!(csrf.take_token().await?, None);

        Ok(())
    }
}
