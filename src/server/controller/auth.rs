use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, CsrfSession},
    service::{guild::GuildService, oauth::DiscordAuthService},
    state::AppState,
};

/// Query parameters for the OAuth callback endpoint.
///
/// Discord omits `code` and sends `error` instead when the user denies access, so every
/// field is optional and validated by the handler.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: Option<String>,
    /// Authorization code from Discord for token exchange.
    pub code: Option<String>,
    /// Error code from Discord, e.g. `access_denied`.
    pub error: Option<String>,
}

/// Redirects the user to Discord's authorization page.
///
/// The CSRF state embedded in the URL is stored in the session and checked by `callback`.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service =
        DiscordAuthService::new(&state.http_client, &state.oauth_client, &state.discord_api);

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// OAuth redirect target.
///
/// Always ends with a redirect to `/`. Failures are logged and leave the user logged out.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    if let Err(e) = complete_login(&state, &session, params).await {
        match &e {
            AppError::AuthErr(err) => tracing::warn!("Login failed: {}", err),
            err => tracing::error!("Login failed: {}", err),
        }
    }

    Redirect::to("/")
}

/// Clears the session and returns to the home page.
pub async fn logout(session: Session) -> Redirect {
    AuthSession::new(&session).clear().await;

    Redirect::to("/")
}

async fn complete_login(
    state: &AppState,
    session: &Session,
    params: CallbackParams,
) -> Result<(), AppError> {
    let auth_session = AuthSession::new(session);
    let auth_service =
        DiscordAuthService::new(&state.http_client, &state.oauth_client, &state.discord_api);

    validate_csrf(session, params.state.as_deref()).await?;

    if let Some(error) = params.error {
        return Err(AuthError::TokenExchange(format!("Discord returned error: {}", error)).into());
    }
    let Some(code) = params.code else {
        return Err(AuthError::TokenExchange("Missing authorization code".to_string()).into());
    };

    let user = auth_service.callback(code).await?;

    auth_session.cycle_id().await?;
    auth_session.set_user(&user).await?;

    tracing::info!("User {} ({}) logged in", user.username, user.id);

    let admin_guilds = GuildService::new(&state.guild_cache)
        .admin_guilds(&user)
        .await?;
    auth_session.set_admin_guilds(&admin_guilds).await?;

    Ok(())
}

async fn validate_csrf(session: &Session, csrf_state: Option<&str>) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match (stored_state, csrf_state) {
        (Some(stored), Some(received)) if stored == received => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
