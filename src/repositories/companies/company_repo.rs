use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument}, IndexModel};
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::entities::companies::Company,
    utils::string_utils::escape_regex,
};
use crate::repositories::{inserted_object_id, map_write_error};

const DUPLICATE_COMPANY: &str = "Une entreprise portant ce nom existe déjà";

/// `entreprises` 컬렉션
///
/// 이름 중복은 `nom_normalise` 고유 인덱스로 막습니다.
#[repository(name = "company", collection = "entreprises")]
pub struct CompanyRepository {
    db: Arc<Database>,
}

impl CompanyRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Company>, AppError> {
        self.collection::<Company>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 이름 순 목록. `q`가 있으면 이름 부분 일치(대소문자 무시)
    pub async fn list(&self, q: Option<&str>) -> Result<Vec<Company>, AppError> {
        let filter = match q {
            Some(q) => doc! { "nom": { "$regex": escape_regex(q), "$options": "i" } },
            None => doc! {},
        };

        self.collection::<Company>()
            .find(filter)
            .sort(doc! { "nom_normalise": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create(&self, mut company: Company) -> Result<Company, AppError> {
        let result = self.collection::<Company>()
            .insert_one(&company)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_COMPANY))?;

        company.id = Some(inserted_object_id(&result)?);
        Ok(company)
    }

    pub async fn update(&self, id: &ObjectId, update_doc: Document) -> Result<Option<Company>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Company>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_COMPANY))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "nom_normalise": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("nom_normalise_unique".to_string())
                .build())
            .build();

        self.collection::<Company>()
            .create_index(name_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
