//! # Redis 캐시 클라이언트
//!
//! 값을 JSON 문자열로 저장하는 얇은 래퍼입니다. 리포지토리 매크로가 생성하는
//! `cache_key` / `invalidate_cache` / `invalidate_collection_cache` 도 이 클라이언트를 사용합니다.
//!
//! 캐시 실패는 조회 경로를 막지 않아야 하므로 호출자는 대부분 결과를 무시하거나
//! 로그만 남깁니다.

use std::env;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

fn encode<T: Serialize>(value: &T) -> Result<String, RedisError> {
    serde_json::to_string(value)
        .map_err(|e| RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, RedisError> {
    serde_json::from_str(json)
        .map_err(|e| RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RedisError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        value.as_deref().map(decode::<T>).transpose()
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), RedisError> {
        let json = encode(value)?;
        let mut conn = self.connection().await?;
        conn.set(key, json).await
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), RedisError> {
        let json = encode(value)?;
        let mut conn = self.connection().await?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, RedisError> {
        let mut conn = self.connection().await?;
        conn.exists(key).await
    }

    pub async fn del(&self, key: &str) -> Result<(), RedisError> {
        let mut conn = self.connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, RedisError> {
        let mut conn = self.connection().await?;
        conn.keys(pattern).await
    }
}

impl Default for RedisClient {
    fn default() -> Self {
        let client = Client::open(redis_url())
            .expect("Failed to create Redis client with default configuration");
        Self { client }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, serde::Deserialize)]
    struct CachedProfile {
        startup_name: String,
        growth_rate: f64,
    }

    #[test]
    fn test_json_codec() {
        let profile = CachedProfile { startup_name: "Acme".to_string(), growth_rate: 12.5 };
        let json = encode(&profile).unwrap();
        assert_eq!(decode::<CachedProfile>(&json).unwrap(), profile);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode::<CachedProfile>("not json").is_err());
    }
}
