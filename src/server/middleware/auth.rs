use tower_sessions::Session;

use crate::{
    model::user::SessionUser,
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
    },
};

/// Guards handlers that need a logged-in user.
pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Returns the user stored in the session.
    ///
    /// # Returns
    /// - `Ok(SessionUser)` - A user is logged in
    /// - `Err(AppError::AuthErr(AuthError::UserNotInSession))` - Nobody is logged in
    /// - `Err(AppError::SessionErr(_))` - Session could not be read
    pub async fn require(&self) -> Result<SessionUser, AppError> {
        let Some(user) = AuthSession::new(self.session).get_user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::context::TestContext;

    #[tokio::test]
    async fn rejects_anonymous_session() {
        let mut test = TestContext::new();

        let result = AuthGuard::new(test.session()).require().await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::UserNotInSession))
        ));
    }

    #[tokio::test]
    async fn returns_logged_in_user() -> Result<(), AppError> {
        let mut test = TestContext::new();
        let user = SessionUser {
            id: "42".to_string(),
            username: "admin".to_string(),
            avatar: None,
            access_token: "token".to_string(),
        };
        AuthSession::new(test.session()).set_user(&user).await?;

        let found = AuthGuard::new(test.session()).require().await?;

        assert_eq!(found, user);

        Ok(())
    }
}
