//! # 지원서 리포지토리
//!
//! `(offre_id, candidat_id)` 고유 인덱스가 같은 공고에 대한 중복 지원을
//! 저장 단계에서 한 번 더 막습니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::applications::{Application, ApplicationStatus},
};
use crate::repositories::{inserted_object_id, map_write_error};

pub const DUPLICATE_APPLICATION: &str = "Vous avez déjà postulé à cette offre";

#[repository(name = "application", collection = "candidatures")]
pub struct ApplicationRepository {
    db: Arc<Database>,
}

impl ApplicationRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Application>, AppError> {
        self.collection::<Application>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn exists_for(&self, offre_id: &ObjectId, candidat_id: &ObjectId) -> Result<bool, AppError> {
        let count = self.collection::<Application>()
            .count_documents(doc! { "offre_id": *offre_id, "candidat_id": *candidat_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    pub async fn create(&self, mut application: Application) -> Result<Application, AppError> {
        let result = self.collection::<Application>()
            .insert_one(&application)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_APPLICATION))?;

        application.id = Some(inserted_object_id(&result)?);
        Ok(application)
    }

    /// 지원자의 지원서 (최신순)
    pub async fn find_by_candidate(&self, candidat_id: &ObjectId) -> Result<Vec<Application>, AppError> {
        self.collection::<Application>()
            .find(doc! { "candidat_id": *candidat_id })
            .sort(doc! { "date_candidature": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 공고에 들어온 지원서 (먼저 지원한 순)
    pub async fn find_by_offer(&self, offre_id: &ObjectId) -> Result<Vec<Application>, AppError> {
        self.collection::<Application>()
            .find(doc! { "offre_id": *offre_id })
            .sort(doc! { "date_candidature": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 공고별 지원서 수. `statut`을 주면 해당 상태만 셉니다.
    pub async fn count_by_offer(&self, offre_id: &ObjectId, statut: Option<ApplicationStatus>) -> Result<u64, AppError> {
        let mut filter = doc! { "offre_id": *offre_id };
        if let Some(statut) = statut {
            filter.insert("statut", statut.as_str());
        }

        self.collection::<Application>()
            .count_documents(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn update_status(&self, id: &ObjectId, statut: ApplicationStatus) -> Result<Option<Application>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Application>()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": { "statut": statut.as_str(), "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 같은 파일(`cv.key`)을 쓰는 지원서 수. 프로필 CV 교체 시 옛 파일을 지워도 되는지 확인합니다.
    pub async fn count_by_cv_key(&self, key: &str) -> Result<u64, AppError> {
        self.collection::<Application>()
            .count_documents(doc! { "cv.key": key })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Application>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    /// 공고의 지원서를 모두 지우고, 지운 문서를 반환합니다 (파일 정리용).
    pub async fn delete_by_offer(&self, offre_id: &ObjectId) -> Result<Vec<Application>, AppError> {
        let applications = self.find_by_offer(offre_id).await?;

        self.collection::<Application>()
            .delete_many(doc! { "offre_id": *offre_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(applications)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let unique_index = IndexModel::builder()
            .keys(doc! { "offre_id": 1, "candidat_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("offre_candidat_unique".to_string())
                .build())
            .build();

        let candidate_index = IndexModel::builder()
            .keys(doc! { "candidat_id": 1, "date_candidature": -1 })
            .options(IndexOptions::builder()
                .name("candidat_date".to_string())
                .build())
            .build();

        self.collection::<Application>()
            .create_indexes([unique_index, candidate_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
