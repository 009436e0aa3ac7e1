use serenity::all::Permissions;

use crate::{
    model::{discord::DiscordGuild, user::SessionUser},
    server::error::auth::AuthError,
};

/// Discord's ADMINISTRATOR permission bit (`0x8`).
pub const ADMINISTRATOR: u64 = Permissions::ADMINISTRATOR.bits();

/// Whether the permission bitmask grants full administrative rights.
pub fn is_admin(guild: &DiscordGuild) -> bool {
    guild.permissions & ADMINISTRATOR == ADMINISTRATOR
}

/// Returns the guilds where the user is an administrator, preserving input order.
pub fn filter_admin(guilds: &[DiscordGuild]) -> Vec<DiscordGuild> {
    guilds.iter().filter(|g| is_admin(g)).cloned().collect()
}

/// Finds a guild by ID and requires the administrator bit on it.
///
/// # Arguments
/// - `user` - User the guild list belongs to, used for error context
/// - `guilds` - The user's full guild list
/// - `guild_id` - ID of the requested guild
///
/// # Returns
/// - `Ok(DiscordGuild)` - Guild exists and the user administers it
/// - `Err(AuthError::GuildNotFound)` - Guild is not in the list
/// - `Err(AuthError::MissingAdministrator)` - Guild found without the administrator bit
pub fn find_admin_guild(
    user: &SessionUser,
    guilds: &[DiscordGuild],
    guild_id: &str,
) -> Result<DiscordGuild, AuthError> {
    let Some(guild) = guilds.iter().find(|g| g.id == guild_id) else {
        return Err(AuthError::GuildNotFound {
            user_id: user.id.clone(),
            guild_id: guild_id.to_string(),
        });
    };

    if !is_admin(guild) {
        return Err(AuthError::MissingAdministrator {
            user_id: user.id.clone(),
            guild_id: guild_id.to_string(),
        });
    }

    Ok(guild.clone())
}
