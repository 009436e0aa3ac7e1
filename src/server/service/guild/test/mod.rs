use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::Instant;

use crate::{
    model::{discord::DiscordGuild, user::SessionUser},
    server::{
        error::{auth::AuthError, discord::DiscordApiError, AppError},
        service::{
            discord::GuildListApi,
            guild::{cache::*, fetch::*, permission::*, GuildService},
        },
    },
};

mod service;

/// Scripted outcome of one fake guild-list call.
#[derive(Clone)]
enum Reply {
    Guilds(Vec<DiscordGuild>),
    RateLimited(Option<Duration>),
    Remote(u16),
}

/// In-process stand-in for Discord's guild-list endpoint.
///
/// Replays the script in order and repeats the last reply once it runs out. Records the
/// (virtual) instant of every call.
struct FakeGuildApi {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Reply>,
    calls: Mutex<Vec<Instant>>,
    latency: Duration,
}

impl FakeGuildApi {
    fn scripted(replies: Vec<Reply>) -> Arc<Self> {
        let last = replies
            .last()
            .cloned()
            .unwrap_or(Reply::Guilds(Vec::new()));

        Arc::new(Self {
            script: Mutex::new(replies.into()),
            last: Mutex::new(last),
            calls: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        })
    }

    fn always(guilds: Vec<DiscordGuild>) -> Arc<Self> {
        Self::scripted(vec![Reply::Guilds(guilds)])
    }

    fn with_latency(guilds: Vec<DiscordGuild>, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(Reply::Guilds(guilds)),
            calls: Mutex::new(Vec::new()),
            latency,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Time between consecutive calls.
    fn gaps(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

#[async_trait]
impl GuildListApi for FakeGuildApi {
    async fn list_guilds(&self, _access_token: &str) -> Result<Vec<DiscordGuild>, DiscordApiError> {
        self.calls.lock().unwrap().push(Instant::now());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let reply = {
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| self.last.lock().unwrap().clone())
        };

        match reply {
            Reply::Guilds(guilds) => Ok(guilds),
            Reply::RateLimited(retry_after) => Err(DiscordApiError::RateLimited { retry_after }),
            Reply::Remote(status) => Err(DiscordApiError::Remote {
                status: reqwest::StatusCode::from_u16(status).unwrap(),
                body: "scripted failure".to_string(),
            }),
        }
    }
}

fn guild(id: &str, permissions: u64) -> DiscordGuild {
    DiscordGuild {
        id: id.to_string(),
        name: format!("Guild {}", id),
        icon: None,
        permissions,
    }
}

fn user() -> SessionUser {
    SessionUser {
        id: "1001".to_string(),
        username: "tester".to_string(),
        avatar: None,
        access_token: "access-token".to_string(),
    }
}

fn fetcher(api: &Arc<FakeGuildApi>) -> GuildFetcher {
    GuildFetcher::new(api.clone() as Arc<dyn GuildListApi>)
}
