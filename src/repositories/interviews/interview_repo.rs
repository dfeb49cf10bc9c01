use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::interviews::{Interview, InterviewStatus},
};
use crate::repositories::inserted_object_id;

/// `entretiens` 컬렉션
///
/// 목록은 모두 면접 시각이 가까운 순으로 정렬합니다.
#[repository(name = "interview", collection = "entretiens")]
pub struct InterviewRepository {
    db: Arc<Database>,
}

impl InterviewRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Interview>, AppError> {
        self.collection::<Interview>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut interview: Interview) -> Result<Interview, AppError> {
        let result = self.collection::<Interview>()
            .insert_one(&interview)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        interview.id = Some(inserted_object_id(&result)?);
        Ok(interview)
    }

    pub async fn find_by_recruiter(&self, recruteur_id: &ObjectId, statut: Option<InterviewStatus>) -> Result<Vec<Interview>, AppError> {
        self.find_sorted(doc! { "recruteur_id": *recruteur_id }, statut).await
    }

    pub async fn find_by_candidate(&self, candidat_id: &ObjectId, statut: Option<InterviewStatus>) -> Result<Vec<Interview>, AppError> {
        self.find_sorted(doc! { "candidat_id": *candidat_id }, statut).await
    }

    pub async fn find_by_offer(&self, offre_id: &ObjectId) -> Result<Vec<Interview>, AppError> {
        self.find_sorted(doc! { "offre_id": *offre_id }, None).await
    }

    async fn find_sorted(&self, mut filter: Document, statut: Option<InterviewStatus>) -> Result<Vec<Interview>, AppError> {
        if let Some(statut) = statut {
            filter.insert("statut", statut.as_str());
        }

        self.collection::<Interview>()
            .find(filter)
            .sort(doc! { "date_entretien": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn update(&self, id: &ObjectId, update_doc: Document) -> Result<Option<Interview>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Interview>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn delete_by_offer(&self, offre_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<Interview>()
            .delete_many(doc! { "offre_id": *offre_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let recruiter_index = IndexModel::builder()
            .keys(doc! { "recruteur_id": 1, "date_entretien": 1 })
            .options(IndexOptions::builder()
                .name("recruteur_date".to_string())
                .build())
            .build();

        let candidate_index = IndexModel::builder()
            .keys(doc! { "candidat_id": 1, "date_entretien": 1 })
            .options(IndexOptions::builder()
                .name("candidat_date".to_string())
                .build())
            .build();

        let offer_index = IndexModel::builder()
            .keys(doc! { "offre_id": 1 })
            .options(IndexOptions::builder()
                .name("offre_id".to_string())
                .build())
            .build();

        self.collection::<Interview>()
            .create_indexes([recruiter_index, candidate_index, offer_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
