use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::candidates::CandidateProfile,
};
use crate::repositories::{inserted_object_id, map_write_error};

/// `candidats` 컬렉션. 사용자당 프로필 하나 (`user_id` unique)
#[repository(name = "candidate", collection = "candidats")]
pub struct CandidateRepository {
    db: Arc<Database>,
}

impl CandidateRepository {
    pub async fn find_by_user(&self, user_id: &ObjectId) -> Result<Option<CandidateProfile>, AppError> {
        self.collection::<CandidateProfile>()
            .find_one(doc! { "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut profile: CandidateProfile) -> Result<CandidateProfile, AppError> {
        let result = self.collection::<CandidateProfile>()
            .insert_one(&profile)
            .await
            .map_err(|e| map_write_error(e, "Le profil candidat existe déjà"))?;

        profile.id = Some(inserted_object_id(&result)?);
        Ok(profile)
    }

    /// `user_id`의 프로필을 부분 업데이트하고 갱신된 문서를 반환합니다.
    pub async fn update_by_user(&self, user_id: &ObjectId, update_doc: Document) -> Result<Option<CandidateProfile>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<CandidateProfile>()
            .find_one_and_update(doc! { "user_id": *user_id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.collection::<CandidateProfile>()
            .create_index(user_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
