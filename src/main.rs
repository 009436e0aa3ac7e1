mod model;
mod server;

use crate::server::{
    config::Config, error::AppError, router, service::discord::DiscordApiClient, startup,
    state::AppState, view::Views,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing("info");

    let config = Config::from_env()?;

    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let discord_api = DiscordApiClient::new(http_client.clone(), &config.discord_api_url);
    let guild_cache = startup::setup_guild_cache(&config, &discord_api);
    let views = Views::new()?;
    let session = startup::setup_session();

    let state = AppState::new(http_client, oauth_client, discord_api, guild_cache, views);
    let app = router::app(state, session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
