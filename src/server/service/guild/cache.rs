//! In-memory guild list cache keyed by access token.
//!
//! Entries live for one hour. Expired entries are not swept; they are replaced by the next
//! fetch for the same token or evicted once the cache reaches capacity. Keys are SHA-256
//! digests of the access token so raw bearer credentials never sit in the map.
//!
//! Concurrent misses for the same token share a single remote fetch: the first caller takes
//! the key's in-flight lock and fetches, later callers wait on that lock and then read the
//! freshly stored entry.

use sha2::{Digest, Sha256};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::Mutex, time::Instant};

use crate::{
    model::discord::DiscordGuild,
    server::{error::discord::DiscordApiError, service::guild::fetch::GuildFetcher},
};

/// Time-to-live for cached guild lists.
pub const GUILD_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Default maximum number of cached guild lists.
pub const DEFAULT_GUILD_CACHE_CAPACITY: usize = 1024;

/// Non-reversible cache key derived from an access token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_access_token(access_token: &str) -> Self {
        Self(hex::encode(Sha256::digest(access_token.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cached guild list with its fetch timestamp.
#[derive(Clone)]
struct CacheEntry {
    guilds: Vec<DiscordGuild>,
    /// When the guild list was fetched from Discord.
    fetched_at: Instant,
    /// Last time the entry was served, used to pick eviction victims.
    last_read: Instant,
}

impl CacheEntry {
    fn new(guilds: Vec<DiscordGuild>) -> Self {
        let now = Instant::now();
        Self {
            guilds,
            fetched_at: now,
            last_read: now,
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Guild list cache in front of a [`GuildFetcher`].
///
/// Cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct GuildCache {
    fetcher: GuildFetcher,
    entries: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
    /// Per-key locks held while a fetch for that key is running.
    in_flight: Arc<Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>>,
    ttl: Duration,
    capacity: usize,
}

impl GuildCache {
    /// Creates a cache with the default TTL and the given capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(fetcher: GuildFetcher, capacity: usize) -> Self {
        Self {
            fetcher,
            entries: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            ttl: GUILD_CACHE_TTL,
            capacity: capacity.max(1),
        }
    }

    /// Returns the guild list for `access_token`, fetching it when absent or expired.
    ///
    /// Failed fetches are not cached; the next call tries again.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 bearer token of the user
    ///
    /// # Returns
    /// - `Ok(Vec<DiscordGuild>)` - Cached or freshly fetched guild list
    /// - `Err(DiscordApiError)` - Fetch failed, propagated from the fetcher
    pub async fn get(&self, access_token: &str) -> Result<Vec<DiscordGuild>, DiscordApiError> {
        let key = CacheKey::from_access_token(access_token);

        if let Some(guilds) = self.read_fresh(&key).await {
            tracing::debug!("Using cached guilds");
            return Ok(guilds);
        }

        let flight = self.flight_lock(&key).await;
        let result = {
            let _guard = flight.lock().await;

            // Another caller may have stored the list while we waited for the lock.
            match self.read_fresh(&key).await {
                Some(guilds) => {
                    tracing::debug!("Using guilds fetched by a concurrent request");
                    Ok(guilds)
                }
                None => {
                    tracing::debug!("Fetching guilds from the Discord API");
                    let result = self.fetcher.fetch(access_token).await;
                    if let Ok(guilds) = &result {
                        self.store(key.clone(), guilds.clone()).await;
                    }
                    result
                }
            }
        };

        self.release_flight(&key, flight).await;

        result
    }

    /// Returns a copy of the entry if it is still within TTL, marking it as read.
    async fn read_fresh(&self, key: &CacheKey) -> Option<Vec<DiscordGuild>> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(key)?;

        if !entry.is_fresh(self.ttl) {
            return None;
        }

        entry.last_read = Instant::now();
        Some(entry.guilds.clone())
    }

    /// Inserts or replaces the entry for `key`, evicting one entry first when full.
    async fn store(&self, key: CacheKey, guilds: Vec<DiscordGuild>) {
        let mut entries = self.entries.lock().await;

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            if let Some(victim) = eviction_victim(&entries, self.ttl) {
                entries.remove(&victim);
            }
        }

        entries.insert(key, CacheEntry::new(guilds));
    }

    async fn flight_lock(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.entry(key.clone()).or_default().clone()
    }

    /// Drops the key's in-flight lock once no other caller holds it.
    ///
    /// The caller's handle is dropped while the map is locked, so the last of several
    /// concurrent releases always sees the map's reference as the only one left.
    async fn release_flight(&self, key: &CacheKey, flight: Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;

        let ours = in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, &flight));
        drop(flight);

        let idle = ours
            && in_flight
                .get(key)
                .is_some_and(|current| Arc::strong_count(current) == 1);

        if idle {
            in_flight.remove(key);
        }
    }

    /// Fetch time of the entry for `access_token`, if one exists.
    #[cfg(test)]
    pub async fn fetched_at(&self, access_token: &str) -> Option<Instant> {
        let key = CacheKey::from_access_token(access_token);
        self.entries.lock().await.get(&key).map(|e| e.fetched_at)
    }

    /// Number of entries, expired ones included.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Number of keys with an in-flight lock registered.
    #[cfg(test)]
    pub async fn in_flight_len(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    #[cfg(test)]
    pub async fn contains_key(&self, key: &CacheKey) -> bool {
        self.entries.lock().await.contains_key(key)
    }
}

/// Picks the entry to evict: the oldest expired entry if any, else the least recently read.
fn eviction_victim(entries: &HashMap<CacheKey, CacheEntry>, ttl: Duration) -> Option<CacheKey> {
    let expired = entries
        .iter()
        .filter(|(_, e)| !e.is_fresh(ttl))
        .min_by_key(|(_, e)| e.fetched_at)
        .map(|(k, _)| k.clone());

    expired.or_else(|| {
        entries
            .iter()
            .min_by_key(|(_, e)| e.last_read)
            .map(|(k, _)| k.clone())
    })
}
