//! Redis cache provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use adminhub_core::error::{AppError, ErrorKind};
use adminhub_core::result::AppResult;
use adminhub_core::traits::cache::{CacheProvider, ExpirePolicy};

use super::client::RedisClient;

/// Stored representation of a cache entry.
///
/// Redis only keeps a countdown TTL per key, so the original TTL and the
/// expiry policy travel with the value; a read of a sliding entry re-arms
/// the key's expiry from the stored TTL.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    /// The serialized value.
    v: String,
    /// Entry TTL in seconds.
    t: u64,
    /// Absolute or sliding expiry.
    p: ExpirePolicy,
}

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    /// Redis client.
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;

        let Some(raw) = raw else { return Ok(None) };
        let entry: StoredEntry = serde_json::from_str(&raw)?;

        if entry.p == ExpirePolicy::Sliding {
            let _: bool = conn
                .expire(&full_key, entry.t as i64)
                .await
                .map_err(Self::map_err)?;
        }

        Ok(Some(entry.v))
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        policy: ExpirePolicy,
    ) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let entry = StoredEntry {
            v: value.to_string(),
            t: ttl.as_secs(),
            p: policy,
        };
        let raw = serde_json::to_string(&entry)?;

        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set_ex(&full_key, raw, ttl.as_secs())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
