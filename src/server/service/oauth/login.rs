use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::oauth::{DiscordAuthService, OAUTH_SCOPES};

impl<'a> DiscordAuthService<'a> {
    /// Builds the Discord authorization URL and the CSRF state it carries.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(OAUTH_SCOPES.iter().map(|s| Scope::new(s.to_string())))
            .url();

        (authorize_url, csrf_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        controller::test::test_config, service::discord::DiscordApiClient,
        startup::setup_oauth_client,
    };

    #[test]
    fn login_url_requests_identify_and_guilds() -> Result<(), crate::server::error::AppError> {
        let config = test_config("https://discord.com/api/v10");
        let http_client = reqwest::Client::new();
        let oauth_client = setup_oauth_client(&config)?;
        let discord_api = DiscordApiClient::new(http_client.clone(), &config.discord_api_url);
        let service = DiscordAuthService::new(&http_client, &oauth_client, &discord_api);

        let (url, csrf) = service.login_url();

        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(url.host_str(), Some("discord.com"));
        assert_eq!(params.get("client_id").map(String::as_str), Some("client-id"));
        assert_eq!(params.get("response_type").map(String::as_str), Some("code"));
        assert_eq!(params.get("scope").map(String::as_str), Some("identify guilds"));
        assert_eq!(
            params.get("redirect_uri").map(String::as_str),
            Some("http://localhost:3000/callback")
        );
        assert_eq!(params.get("state"), Some(csrf.secret()));

        Ok(())
    }
}
