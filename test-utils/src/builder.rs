use crate::{
    context::TestContext,
    error::TestError,
    mock::{MockDiscordServer, MockResponse},
};

/// Builder for creating test contexts.
///
/// Provides a fluent interface for scripting the mock Discord API. Call `build()` to start
/// the configured environment.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, mock::MockResponse};
///
/// let test = TestBuilder::new()
///     .with_discord_response(MockResponse::rate_limited(Some("0")))
///     .with_discord_response(MockResponse::ok(serde_json::json!([])))
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Scripted responses for the mock guild-list endpoint, replayed in order.
    ///
    /// `None` means no mock server is started.
    discord_responses: Option<Vec<MockResponse>>,

    /// Body served by the mock `GET /users/@me`.
    current_user: Option<serde_json::Value>,
}

impl TestBuilder {
    /// Creates a new test builder with no mock Discord API configured.
    pub fn new() -> Self {
        Self {
            discord_responses: None,
            current_user: None,
        }
    }

    /// Appends one scripted response to the mock guild-list endpoint.
    ///
    /// The first call also enables the mock server.
    pub fn with_discord_response(mut self, response: MockResponse) -> Self {
        self.discord_responses
            .get_or_insert_with(Vec::new)
            .push(response);
        self
    }

    /// Sets the user returned by the mock `GET /users/@me`.
    ///
    /// Also enables the mock server.
    pub fn with_current_user(mut self, user: serde_json::Value) -> Self {
        self.discord_responses.get_or_insert_with(Vec::new);
        self.current_user = Some(user);
        self
    }

    /// Appends several scripted responses, in order.
    pub fn with_discord_responses(
        mut self,
        responses: impl IntoIterator<Item = MockResponse>,
    ) -> Self {
        self.discord_responses
            .get_or_insert_with(Vec::new)
            .extend(responses);
        self
    }

    /// Builds the test context, starting the mock Discord server if any responses were
    /// scripted.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context ready for use
    /// - `Err(TestError::Io)` - Failed to bind the mock server
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();

        if let Some(responses) = self.discord_responses {
            context.discord = Some(MockDiscordServer::start(responses, self.current_user).await?);
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
