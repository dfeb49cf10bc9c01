//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use singleton_macro::repository;
use crate::{
    caching::redis::RedisClient,
    config::CacheConfig,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::users::User,
};
use crate::repositories::{inserted_object_id, map_write_error};

/// 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// - **TTL**: `USER_CACHE_TTL_SECONDS` (기본 600초)
/// - **키 패턴**:
///   - ID 조회: `user_repository:{user_id}`
///   - 이메일 조회: `user_repository:email:{email}`
/// - 쓰기 후 두 키를 모두 무효화합니다.
///
/// ## 인덱스
///
/// - `email` (unique)
/// - `created_at` (desc)
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn email_cache_key(&self, email: &str) -> String {
        self.cache_key(&format!("email:{}", email))
    }

    /// 이메일 주소로 사용자 조회 (캐시 우선)
    ///
    /// 이메일은 호출하는 쪽에서 `normalize_email`로 정규화해 전달합니다.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = self.email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    /// ID로 사용자 조회 (캐시 우선)
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    /// 여러 사용자를 한 번에 조회합니다. 지원자 목록에 이름을 붙일 때 사용합니다.
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection::<User>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 이메일 고유 인덱스 위반은 `ConflictError`(400)로 변환됩니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, "Cet email est déjà utilisé"))?;

        user.id = Some(inserted_object_id(&result)?);

        Ok(user)
    }

    /// 사용자 정보 부분 업데이트 (`$set`)
    ///
    /// 업데이트된 문서를 반환하고 ID/이메일 캐시를 모두 무효화합니다.
    pub async fn update(&self, id: &ObjectId, update_doc: Document) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, "Cet email est déjà utilisé"))?;

        if let Some(ref user) = updated_user {
            self.invalidate_user(user).await;
        }

        Ok(updated_user)
    }

    async fn cache_user(&self, cache_key: &str, user: &User) {
        if let Err(e) = self.redis
            .set_with_expiry(cache_key, user, CacheConfig::user_ttl_seconds())
            .await
        {
            log::warn!("⚠️ Mise en cache de l'utilisateur impossible: {}", e);
        }
    }

    async fn invalidate_user(&self, user: &User) {
        let mut keys = vec![self.email_cache_key(&user.email)];
        if let Some(id) = user.id_string() {
            keys.push(self.cache_key(&id));
        }

        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("⚠️ Invalidation du cache utilisateur impossible: {}", e);
        }
    }

    /// 인덱스 생성
    ///
    /// 이미 중복 이메일이 저장되어 있으면 고유 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
