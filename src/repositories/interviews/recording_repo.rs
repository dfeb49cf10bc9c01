use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::interviews::Recording,
};
use crate::repositories::inserted_object_id;

/// `enregistrements` 컬렉션 (면접 녹화 영상과 전사본)
#[repository(name = "recording", collection = "enregistrements")]
pub struct RecordingRepository {
    db: Arc<Database>,
}

impl RecordingRepository {
    pub async fn create(&self, mut recording: Recording) -> Result<Recording, AppError> {
        let result = self.collection::<Recording>()
            .insert_one(&recording)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        recording.id = Some(inserted_object_id(&result)?);
        Ok(recording)
    }

    pub async fn find_by_interview(&self, entretien_id: &ObjectId) -> Result<Vec<Recording>, AppError> {
        self.find_by_interviews(std::slice::from_ref(entretien_id)).await
    }

    pub async fn find_by_interviews(&self, entretien_ids: &[ObjectId]) -> Result<Vec<Recording>, AppError> {
        if entretien_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection::<Recording>()
            .find(doc! { "entretien_id": { "$in": entretien_ids.to_vec() } })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete_by_interviews(&self, entretien_ids: &[ObjectId]) -> Result<u64, AppError> {
        if entretien_ids.is_empty() {
            return Ok(0);
        }

        let result = self.collection::<Recording>()
            .delete_many(doc! { "entretien_id": { "$in": entretien_ids.to_vec() } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let interview_index = IndexModel::builder()
            .keys(doc! { "entretien_id": 1, "created_at": 1 })
            .options(IndexOptions::builder()
                .name("entretien_created_at".to_string())
                .build())
            .build();

        self.collection::<Recording>()
            .create_index(interview_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
