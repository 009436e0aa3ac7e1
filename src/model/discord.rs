use serde::{Deserialize, Serialize};

const DISCORD_CDN_URL: &str = "https://cdn.discordapp.com";

/// A guild entry from Discord's `GET /users/@me/guilds` endpoint.
///
/// Only the fields the dashboard uses are kept. The record is never mutated locally; every
/// fetch replaces the whole list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiscordGuild {
    /// Guild snowflake ID as sent by Discord.
    pub id: String,
    /// Guild display name.
    pub name: String,
    /// Optional icon hash for constructing icon URLs.
    #[serde(default)]
    pub icon: Option<String>,
    /// Permission bitmask of the current user in this guild.
    ///
    /// Discord v10 sends this as a decimal string. Missing or malformed values become 0.
    #[serde(default, deserialize_with = "deserialize_permissions")]
    pub permissions: u64,
}

impl DiscordGuild {
    /// Icon URL for this guild, `None` if the guild has no icon.
    pub fn icon_url(&self) -> Option<String> {
        cdn_image_url("icons", &self.id, self.icon.as_deref())
    }
}

/// Guild data handed to the views.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiscordGuildDto {
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
}

impl From<&DiscordGuild> for DiscordGuildDto {
    fn from(guild: &DiscordGuild) -> Self {
        Self {
            id: guild.id.clone(),
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
        }
    }
}

/// Builds a Discord CDN image URL.
///
/// Hashes prefixed with `a_` are animated and served as `.gif`, everything else as `.png`.
///
/// # Arguments
/// - `kind` - CDN path segment, `icons` for guilds or `avatars` for users
/// - `owner_id` - ID of the guild or user owning the image
/// - `hash` - Image hash, if any
///
/// # Returns
/// - `Some(url)` - Full CDN URL for the image
/// - `None` - No hash was provided
pub fn cdn_image_url(kind: &str, owner_id: &str, hash: Option<&str>) -> Option<String> {
    let hash = hash.filter(|h| !h.is_empty())?;
    let ext = if hash.starts_with("a_") { "gif" } else { "png" };

    Some(format!(
        "{}/{}/{}/{}.{}",
        DISCORD_CDN_URL, kind, owner_id, hash, ext
    ))
}

fn deserialize_permissions<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    let permissions = match value {
        serde_json::Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    };

    Ok(permissions)
}
