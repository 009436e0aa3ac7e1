//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the Discord API. They are responsible for:
//!
//! - **OAuth**: Building the login redirect and completing the code exchange
//! - **Guilds**: Fetching guild lists with backoff, caching them, and applying admin checks
//! - **Discord**: The raw REST client the other services call

pub mod discord;
pub mod guild;
pub mod oauth;
