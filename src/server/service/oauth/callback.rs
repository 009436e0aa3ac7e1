use oauth2::{AuthorizationCode, TokenResponse};

use crate::{
    model::user::SessionUser,
    server::{
        error::{auth::AuthError, AppError},
        service::oauth::DiscordAuthService,
    },
};

impl<'a> DiscordAuthService<'a> {
    /// Exchanges the authorization code and loads the user's Discord profile.
    ///
    /// # Returns
    /// - `Ok(SessionUser)` - Profile plus the access token to keep in the session
    /// - `Err(AppError::AuthErr(AuthError::TokenExchange(_)))` - Discord rejected the code
    /// - `Err(AppError::DiscordErr(_))` - Profile could not be fetched
    pub async fn callback(&self, authorization_code: String) -> Result<SessionUser, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let access_token = token.access_token().secret().to_string();
        let user = self.discord_api.current_user(&access_token).await?;

        Ok(SessionUser {
            id: user.id.get().to_string(),
            username: user.name,
            avatar: user.avatar.map(|hash| hash.to_string()),
            access_token,
        })
    }
}
