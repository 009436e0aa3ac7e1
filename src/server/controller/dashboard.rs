use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    model::{discord::DiscordGuildDto, user::UserDto},
    server::{
        error::{
            auth::{AuthError, GUILD_ACCESS_DENIED_MESSAGE},
            AppError,
        },
        middleware::{auth::AuthGuard, session::AuthSession},
        service::guild::GuildService,
        state::AppState,
        view::{DASHBOARD_LOAD_ERROR_MESSAGE, SERVER_LOAD_ERROR_MESSAGE},
    },
};

/// Home page showing either the login link or the logged-in user.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let user = AuthSession::new(&session)
        .get_user()
        .await?
        .map(|user| UserDto::from(&user));

    Ok(Html(state.views.render_index(user.as_ref())?))
}

/// Lists the guilds the user administers.
///
/// Anonymous visitors are sent to `/`. When the guild list cannot be loaded the page still
/// renders, with an error message and an empty list, under HTTP 500.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let user = match AuthGuard::new(&session).require().await {
        Ok(user) => user,
        Err(AppError::AuthErr(AuthError::UserNotInSession)) => {
            return Ok(Redirect::to("/").into_response())
        }
        Err(e) => return Err(e),
    };
    let user_dto = UserDto::from(&user);

    match GuildService::new(&state.guild_cache).admin_guilds(&user).await {
        Ok(guilds) => {
            AuthSession::new(&session).set_admin_guilds(&guilds).await?;

            let guilds: Vec<DiscordGuildDto> = guilds.iter().map(DiscordGuildDto::from).collect();
            let html = state.views.render_dashboard(&user_dto, &guilds, None)?;

            Ok(Html(html).into_response())
        }
        Err(e) => {
            tracing::error!("Failed to load guilds for user {}: {}", user.id, e);

            let html =
                state
                    .views
                    .render_dashboard(&user_dto, &[], Some(DASHBOARD_LOAD_ERROR_MESSAGE))?;

            Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response())
        }
    }
}

/// Shows a single guild the user administers.
///
/// Anonymous visitors are sent to `/login`. A guild that is missing from the user's list and
/// one without the administrator bit both produce the same 403 page.
pub async fn server(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<String>,
) -> Result<Response, AppError> {
    let user = match AuthGuard::new(&session).require().await {
        Ok(user) => user,
        Err(AppError::AuthErr(AuthError::UserNotInSession)) => {
            return Ok(Redirect::to("/login").into_response())
        }
        Err(e) => return Err(e),
    };
    let user_dto = UserDto::from(&user);

    let result = GuildService::new(&state.guild_cache)
        .managed_guild(&user, &guild_id)
        .await;

    let (status, html) = match result {
        Ok(guild) => {
            let guild = DiscordGuildDto::from(&guild);
            let html = state.views.render_server(&user_dto, Some(&guild), None)?;

            (StatusCode::OK, html)
        }
        Err(AppError::AuthErr(err)) if err.is_guild_access_denied() => {
            tracing::debug!("{}", err);

            let html =
                state
                    .views
                    .render_server(&user_dto, None, Some(GUILD_ACCESS_DENIED_MESSAGE))?;

            (StatusCode::FORBIDDEN, html)
        }
        Err(e) => {
            tracing::error!(
                "Failed to verify permissions of user {} in guild {}: {}",
                user.id,
                guild_id,
                e
            );

            let html = state
                .views
                .render_server(&user_dto, None, Some(SERVER_LOAD_ERROR_MESSAGE))?;

            (StatusCode::INTERNAL_SERVER_ERROR, html)
        }
    };

    Ok((status, Html(html)).into_response())
}
