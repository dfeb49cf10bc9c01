use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::security::AuthEvent,
};
use crate::repositories::inserted_object_id;

/// `auth_logs` 컬렉션 (인증 감사 로그)
#[repository(name = "authlog", collection = "auth_logs")]
pub struct AuthLogRepository {
    db: Arc<Database>,
}

impl AuthLogRepository {
    pub async fn record(&self, mut event: AuthEvent) -> Result<AuthEvent, AppError> {
        let result = self.collection::<AuthEvent>()
            .insert_one(&event)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        event.id = Some(inserted_object_id(&result)?);
        Ok(event)
    }

    /// 최근 이벤트부터 `limit`건. `email`을 주면 해당 계정만 조회합니다.
    pub async fn find_recent(&self, email: Option<&str>, limit: i64) -> Result<Vec<AuthEvent>, AppError> {
        let filter = match email {
            Some(email) => doc! { "email": email },
            None => doc! {},
        };

        self.collection::<AuthEvent>()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("email_created_at".to_string())
                .build())
            .build();

        self.collection::<AuthEvent>()
            .create_indexes([created_at_index, email_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
