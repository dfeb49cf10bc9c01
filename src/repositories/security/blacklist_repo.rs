//! # JWT 블랙리스트 리포지토리
//!
//! 로그아웃이나 비밀번호 변경으로 폐기된 토큰을 `jti` 기준으로 저장합니다.
//!
//! ```text
//! is_revoked(jti)
//!   ├─ Redis `blacklist_repository:{jti}` 존재 → true
//!   └─ MongoDB token_blacklist 조회 → 있으면 Redis 플래그 기록 후 true
//! ```
//!
//! `expires_at`에 `expireAfterSeconds: 0` TTL 인덱스를 걸어 토큰 만료 시점이 지나면
//! MongoDB가 문서를 정리합니다. Redis 플래그도 같은 시점까지만 유지됩니다.

use std::sync::Arc;
use std::time::Duration;
use mongodb::{bson::{doc, DateTime}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::security::RevokedToken,
};
use crate::repositories::is_duplicate_key_error;

#[repository(name = "blacklist", collection = "token_blacklist")]
pub struct BlacklistRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl BlacklistRepository {
    /// 토큰을 폐기 목록에 추가합니다.
    ///
    /// 이번 호출로 추가되었으면 `true`, 이미 폐기된 `jti`면 `false`입니다.
    /// `jti` 고유 인덱스가 판정하므로 동시에 들어온 두 요청 중 하나만 `true`를 받습니다.
    pub async fn revoke(&self, token: &RevokedToken) -> Result<bool, AppError> {
        let inserted = match self.collection::<RevokedToken>().insert_one(token).await {
            Ok(_) => true,
            Err(e) if is_duplicate_key_error(&e) => {
                log::debug!("Jeton déjà révoqué: {}", token.jti);
                false
            }
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        };

        self.cache_revoked(&token.jti, &token.expires_at).await;
        Ok(inserted)
    }

    /// `jti`가 폐기되었는지 확인합니다.
    pub async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        if let Ok(true) = self.redis.exists(&self.cache_key(jti)).await {
            return Ok(true);
        }

        let revoked = self.collection::<RevokedToken>()
            .find_one(doc! { "jti": jti })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match revoked {
            Some(token) => {
                self.cache_revoked(&token.jti, &token.expires_at).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn cache_revoked(&self, jti: &str, expires_at: &DateTime) {
        let remaining_millis = expires_at.timestamp_millis() - DateTime::now().timestamp_millis();
        if remaining_millis <= 0 {
            return;
        }

        let ttl_seconds = (remaining_millis as u64).div_ceil(1000);
        if let Err(e) = self.redis.set_with_expiry(&self.cache_key(jti), &true, ttl_seconds).await {
            log::warn!("⚠️ Cache de révocation indisponible: {}", e);
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let jti_index = IndexModel::builder()
            .keys(doc! { "jti": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("jti_unique".to_string())
                .build())
            .build();

        let ttl_index = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(IndexOptions::builder()
                .expire_after(Duration::from_secs(0))
                .name("expires_at_ttl".to_string())
                .build())
            .build();

        self.collection::<RevokedToken>()
            .create_indexes([jti_index, ttl_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
