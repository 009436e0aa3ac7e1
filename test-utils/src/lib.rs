//! Guildboard Test Utils
//!
//! Provides shared testing utilities for the guildboard application. This crate offers a
//! builder for creating test contexts with an in-memory session and a scripted mock of
//! Discord's guild-list endpoint.
//!
//! # Overview
//!
//! The test utilities consist of these components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the session and mock Discord server
//! - **MockDiscordServer**: Local HTTP server replaying scripted Discord responses
//! - **factory**: Guild JSON builders shaped like Discord's API payloads
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory, mock::MockResponse};
//!
//! #[tokio::test]
//! async fn test_guild_fetch() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_discord_response(MockResponse::rate_limited(Some("0")))
//!         .with_discord_response(MockResponse::ok(factory::guild::guild_list(&[
//!             factory::guild::create_admin_guild("1"),
//!         ])))
//!         .build()
//!         .await?;
//!
//!     let api_url = test.discord_api_url().unwrap();
//!     // Point the client under test at `api_url`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod mock;
