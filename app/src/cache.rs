use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::Config;

struct Entry<T> {
    value: T,
    expires_at: Option<Instant>,
}

impl<T> Entry<T> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// In-process key/value store with optional per-entry expiry.
pub struct Cache<T> {
    data: Arc<Mutex<HashMap<String, Entry<T>>>>,
}

impl<T> Clone for Cache<T> {
    fn clone(&self) -> Self {
        Cache {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Cache<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn get_connection(&self) -> MutexGuard<'_, HashMap<String, Entry<T>>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_data(&self, id: &str, value: T, ttl: Option<Duration>) {
        let mut conn = self.get_connection();
        conn.insert(
            id.to_owned(),
            Entry {
                value,
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
    }

    pub fn delete_data(&self, id: &str) -> Option<T> {
        let mut conn = self.get_connection();
        conn.remove(id).map(|e| e.value)
    }
}

impl<T: Clone> Cache<T> {
    pub fn get_data(&self, id: &str) -> Option<T> {
        let mut conn = self.get_connection();
        match conn.get(id) {
            Some(entry) if entry.is_live(Instant::now()) => Some(entry.value.clone()),
            Some(_) => {
                conn.remove(id);
                None
            }
            None => None,
        }
    }
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
enum Backend {
    Redis(ConnectionManager),
    Memory(Cache<String>),
}

/// Lookaside cache for read-heavy queries. Values are stored as JSON with a fixed TTL.
///
/// Failures never reach the caller: a broken cache behaves like an empty one and the
/// request falls through to the database.
#[derive(Clone)]
pub struct CacheClient {
    backend: Backend,
    ttl: Duration,
}

impl CacheClient {
    /// Uses Redis when `REDIS_URL` is configured, the in-process store otherwise.
    pub async fn connect(config: &Config) -> Result<Self, redis::RedisError> {
        match &config.redis_url {
            Some(url) => {
                let client = Client::open(url.as_str())?;
                let conn = ConnectionManager::new(client).await?;
                tracing::info!("Cache backed by redis");
                Ok(Self {
                    backend: Backend::Redis(conn),
                    ttl: config.cache_ttl,
                })
            }
            None => {
                tracing::info!("REDIS_URL not set, using in-process cache");
                Ok(Self::in_memory(config.cache_ttl))
            }
        }
    }

    pub fn in_memory(ttl: Duration) -> Self {
        Self {
            backend: Backend::Memory(Cache::new()),
            ttl,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match &self.backend {
            Backend::Redis(conn) => {
                let mut conn = conn.clone();
                match conn.get::<_, Option<String>>(key).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(key, error = %e, "Cache read failed");
                        None
                    }
                }
            }
            Backend::Memory(cache) => cache.get_data(key),
        };

        let Some(raw) = raw else {
            debug!(key, "Cache miss");
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                self.delete(&[key]).await;
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to encode cache entry");
                return;
            }
        };

        match &self.backend {
            Backend::Redis(conn) => {
                let mut conn = conn.clone();
                if let Err(e) = conn
                    .set_ex::<_, _, ()>(key, raw, self.ttl.as_secs().max(1))
                    .await
                {
                    warn!(key, error = %e, "Cache write failed");
                }
            }
            Backend::Memory(cache) => cache.set_data(key, raw, Some(self.ttl)),
        }
    }

    pub async fn delete(&self, keys: &[&str]) {
        if keys.is_empty() {
            return;
        }
        match &self.backend {
            Backend::Redis(conn) => {
                let mut conn = conn.clone();
                if let Err(e) = conn.del::<_, ()>(keys).await {
                    warn!(?keys, error = %e, "Cache delete failed");
                }
            }
            Backend::Memory(cache) => {
                for key in keys {
                    cache.delete_data(key);
                }
            }
        }
    }
}

pub mod keys {
    pub const LEADERBOARD: &str = "leaderboard:players";
    pub const PLATFORM_SUMMARY: &str = "analytics:summary";

    pub fn player_dashboard(player_id: &str) -> String {
        format!("dashboard:player:{player_id}")
    }

    pub fn organiser_dashboard(organiser_id: &str) -> String {
        format!("dashboard:organiser:{organiser_id}")
    }

    pub fn player_profile(username: &str) -> String {
        format!("profile:player:{username}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_entries_are_not_returned() {
        let cache = Cache::new();
        cache.set_data("a", 1, Some(Duration::from_millis(10)));
        cache.set_data("b", 2, None);
        assert_eq!(cache.get_data("a"), Some(1));

        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(cache.get_data("a"), None);
        assert_eq!(cache.delete_data("a"), None);
        assert_eq!(cache.get_data("b"), Some(2));
    }

    #[tokio::test]
    async fn json_round_trip_and_delete() {
        let client = CacheClient::in_memory(Duration::from_secs(60));
        client.set_json("k", &vec![1, 2, 3]).await;
        assert_eq!(client.get_json::<Vec<i32>>("k").await, Some(vec![1, 2, 3]));

        client.delete(&["k"]).await;
        assert_eq!(client.get_json::<Vec<i32>>("k").await, None);
    }

    #[tokio::test]
    async fn undecodable_entry_is_a_miss() {
        let client = CacheClient::in_memory(Duration::from_secs(60));
        client.set_json("k", &"text").await;
        assert_eq!(client.get_json::<u64>("k").await, None);
    }
}
