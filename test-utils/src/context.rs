use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session};

use crate::mock::MockDiscordServer;

/// Test context containing an in-memory session and an optional mock Discord server.
///
/// The session is created lazily on first access and persists for the lifetime of the
/// test context.
pub struct TestContext {
    /// Optional session instance for session handling.
    ///
    /// Initialized lazily when `session()` is first called. Backed by a fresh
    /// `MemoryStore`, so nothing is shared between tests.
    pub session: Option<Session>,

    /// Mock Discord API, present when the builder scripted any responses.
    pub discord: Option<MockDiscordServer>,
}

impl TestContext {
    /// Creates a new empty test context.
    pub fn new() -> Self {
        Self {
            session: None,
            discord: None,
        }
    }

    /// Gets or creates the test session instance.
    ///
    /// Returns a reference to the existing session if one exists, otherwise creates a new
    /// session backed by an in-memory store. Subsequent calls return the same session.
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestContext::new();
    /// let session = test.session();
    ///
    /// session.insert("user_id", 123).await?;
    /// ```
    pub fn session(&mut self) -> &Session {
        self.session.get_or_insert_with(|| {
            Session::new(
                None,
                Arc::new(MemoryStore::default()),
                Some(Expiry::OnInactivity(Duration::days(7))),
            )
        })
    }

    /// Base URL of the mock Discord API, if one was started.
    pub fn discord_api_url(&self) -> Option<String> {
        self.discord.as_ref().map(MockDiscordServer::api_url)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
