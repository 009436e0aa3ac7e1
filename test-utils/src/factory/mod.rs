//! Factory methods for creating test data.
//!
//! Factories build JSON payloads shaped like Discord's API responses, with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let admin = factory::create_admin_guild("1");
//! let member = factory::create_member_guild("2");
//!
//! // Customize with the builder
//! let guild = factory::guild::GuildFactory::new("3")
//!     .name("Custom Guild")
//!     .icon("a_animated")
//!     .permissions("12")
//!     .build();
//!
//! let body = factory::guild_list(&[admin, member, guild]);
//! ```
//!
//! # Available Factories
//!
//! - `guild` - Create guild entries of `GET /users/@me/guilds`
//! - `user` - Create the `GET /users/@me` payload

pub mod guild;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use guild::{create_admin_guild, create_member_guild, guild_list};
pub use user::create_discord_user;
