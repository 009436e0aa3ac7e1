//! Discord REST API access on behalf of an OAuth2-authenticated user.

pub mod api;

pub use api::{DiscordApiClient, GuildListApi};

#[cfg(test)]
mod test;
