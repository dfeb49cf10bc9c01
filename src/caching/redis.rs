//! # Redis 캐시 클라이언트 구현
//!
//! 사용자 조회 결과와 폐기된 토큰 플래그를 캐시합니다.
//! Redis는 선택 사항이므로, [`RedisClient::disabled`]로 만든 클라이언트는
//! 모든 조회에 `None`을, 모든 쓰기에 `Ok(())`를 돌려줍니다.
//! 호출하는 쪽은 캐시 미스와 동일하게 MongoDB로 폴백합니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 처리합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::CacheConfig;

#[derive(Clone)]
pub struct RedisClient {
    client: Option<Client>,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(CacheConfig::redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client: Some(client) })
    }

    /// 캐시를 사용하지 않는 클라이언트
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    async fn connection(&self) -> Result<Option<redis::aio::MultiplexedConnection>, redis::RedisError> {
        match &self.client {
            Some(client) => Ok(Some(client.get_multiplexed_async_connection().await?)),
            None => Ok(None),
        }
    }

    /// JSON으로 저장된 값을 읽어 역직렬화합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let Some(mut conn) = self.connection().await? else {
            return Ok(None);
        };
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let Some(mut conn) = self.connection().await? else {
            return Ok(());
        };
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds.max(1)).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, redis::RedisError> {
        let Some(mut conn) = self.connection().await? else {
            return Ok(false);
        };
        conn.exists(key).await
    }

    /// `#[repository]`가 생성하는 `invalidate_cache`가 사용합니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let Some(mut conn) = self.connection().await? else {
            return Ok(());
        };
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let Some(mut conn) = self.connection().await? else {
            return Ok(());
        };
        conn.del(keys).await
    }

    /// `#[repository]`가 생성하는 `invalidate_pattern_cache`가 사용합니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let Some(mut conn) = self.connection().await? else {
            return Ok(Vec::new());
        };
        conn.keys(pattern).await
    }
}

impl Default for RedisClient {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_disabled_client_is_a_cache_miss() {
        let cache = RedisClient::disabled();
        assert!(!cache.is_enabled());

        cache.set_with_expiry("user_repository:abc", &"Jean", 60).await.unwrap();
        let cached: Option<String> = cache.get("user_repository:abc").await.unwrap();
        assert!(cached.is_none());
        assert!(!cache.exists("user_repository:abc").await.unwrap());
        cache.del("user_repository:abc").await.unwrap();
        cache.del_multiple(&["user_repository:abc".to_string()]).await.unwrap();
    }
}
