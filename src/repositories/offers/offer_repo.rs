//! # 채용 공고 리포지토리
//!
//! 공개 목록 검색 필터는 서비스 계층에서 `Document`로 만들어 전달합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::offers::JobOffer,
};
use crate::repositories::inserted_object_id;

#[repository(name = "offer", collection = "offres_emploi")]
pub struct OfferRepository {
    db: Arc<Database>,
}

impl OfferRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<JobOffer>, AppError> {
        self.collection::<JobOffer>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<JobOffer>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection::<JobOffer>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 필터에 맞는 공고를 최신순으로 한 페이지 조회하고 전체 개수를 함께 반환합니다.
    pub async fn search(&self, filter: Document, skip: u64, limit: i64) -> Result<(Vec<JobOffer>, u64), AppError> {
        let collection = self.collection::<JobOffer>();

        let total = collection
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let items = collection
            .find(filter)
            .sort(doc! { "date_publication": -1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((items, total))
    }

    /// 리크루터가 올린 공고 (최신순)
    pub async fn find_by_recruiter(&self, recruteur_id: &ObjectId) -> Result<Vec<JobOffer>, AppError> {
        self.collection::<JobOffer>()
            .find(doc! { "recruteur_id": *recruteur_id })
            .sort(doc! { "date_publication": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut offer: JobOffer) -> Result<JobOffer, AppError> {
        let result = self.collection::<JobOffer>()
            .insert_one(&offer)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        offer.id = Some(inserted_object_id(&result)?);
        Ok(offer)
    }

    pub async fn update(&self, id: &ObjectId, update_doc: Document) -> Result<Option<JobOffer>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<JobOffer>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 회사 이름이 바뀌면 공고에 복사해 둔 이름도 갱신합니다.
    pub async fn rename_company(&self, entreprise_id: &ObjectId, nom: &str) -> Result<u64, AppError> {
        let result = self.collection::<JobOffer>()
            .update_many(
                doc! { "entreprise_id": *entreprise_id },
                doc! { "$set": { "entreprise_nom": nom, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<JobOffer>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let listing_index = IndexModel::builder()
            .keys(doc! { "statut": 1, "date_publication": -1 })
            .options(IndexOptions::builder()
                .name("statut_date_publication".to_string())
                .build())
            .build();

        let recruiter_index = IndexModel::builder()
            .keys(doc! { "recruteur_id": 1, "date_publication": -1 })
            .options(IndexOptions::builder()
                .name("recruteur_date_publication".to_string())
                .build())
            .build();

        let company_index = IndexModel::builder()
            .keys(doc! { "entreprise_id": 1 })
            .options(IndexOptions::builder()
                .name("entreprise_id".to_string())
                .build())
            .build();

        self.collection::<JobOffer>()
            .create_indexes([listing_index, recruiter_index, company_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
