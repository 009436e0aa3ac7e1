//! Guild lookups for the authenticated user.
//!
//! Route handlers go through [`GuildService`], which reads the user's guild list from the
//! [`GuildCache`] (fetching with backoff on a miss) and applies the administrator filter.

pub mod cache;
pub mod fetch;
pub mod permission;

pub use cache::GuildCache;
pub use fetch::GuildFetcher;

use crate::{
    model::{discord::DiscordGuild, user::SessionUser},
    server::error::AppError,
};

pub struct GuildService<'a> {
    cache: &'a GuildCache,
}

impl<'a> GuildService<'a> {
    pub fn new(cache: &'a GuildCache) -> Self {
        Self { cache }
    }

    /// Guilds where the user holds the administrator bit, in Discord's order.
    ///
    /// # Returns
    /// - `Ok(Vec<DiscordGuild>)` - Administered guilds, possibly empty
    /// - `Err(AppError::DiscordErr(_))` - Guild list could not be fetched
    pub async fn admin_guilds(&self, user: &SessionUser) -> Result<Vec<DiscordGuild>, AppError> {
        let guilds = self.cache.get(&user.access_token).await?;

        Ok(permission::filter_admin(&guilds))
    }

    /// A single guild the user administers.
    ///
    /// # Returns
    /// - `Ok(DiscordGuild)` - Guild exists and the user administers it
    /// - `Err(AppError::AuthErr(_))` - Guild not found or administrator bit missing
    /// - `Err(AppError::DiscordErr(_))` - Guild list could not be fetched
    pub async fn managed_guild(
        &self,
        user: &SessionUser,
        guild_id: &str,
    ) -> Result<DiscordGuild, AppError> {
        let guilds = self.cache.get(&user.access_token).await?;

        Ok(permission::find_admin_guild(user, &guilds, guild_id)?)
    }
}

#[cfg(test)]
mod test;
