use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api/v10";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_GUILD_CACHE_CAPACITY: usize = 1024;

pub struct Config {
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_callback_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    pub bind_address: String,
    pub guild_cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_client_id: required_var("DISCORD_CLIENT_ID")?,
            discord_client_secret: required_var("DISCORD_CLIENT_SECRET")?,
            discord_callback_url: required_var("DISCORD_CALLBACK_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            guild_cache_capacity: parse_capacity(std::env::var("GUILD_CACHE_CAPACITY").ok())?,
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_capacity(value: Option<String>) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_GUILD_CACHE_CAPACITY);
    };

    match value.trim().parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        Ok(_) => Err(ConfigError::InvalidEnvVar {
            name: "GUILD_CACHE_CAPACITY".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: "GUILD_CACHE_CAPACITY".to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_defaults_when_unset() {
        assert_eq!(parse_capacity(None).unwrap(), DEFAULT_GUILD_CACHE_CAPACITY);
    }

    #[test]
    fn capacity_parses_value() {
        assert_eq!(parse_capacity(Some(" 64 ".to_string())).unwrap(), 64);
    }

    #[test]
    fn capacity_rejects_zero_and_garbage() {
        assert!(matches!(
            parse_capacity(Some("0".to_string())),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
        assert!(matches!(
            parse_capacity(Some("lots".to_string())),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
    }
}
