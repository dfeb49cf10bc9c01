//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들을 제공합니다.
//! MongoDB를 주 저장소로 사용하고, 사용자 조회와 폐기 토큰 확인에는 Redis 캐시를 씁니다.
//!
//! | 리포지토리 | 컬렉션 |
//! |------------|--------|
//! | [`users::UserRepository`] | `users` |
//! | [`candidates::CandidateRepository`] | `candidats` |
//! | [`companies::CompanyRepository`] | `entreprises` |
//! | [`offers::OfferRepository`] | `offres_emploi` |
//! | [`applications::ApplicationRepository`] | `candidatures` |
//! | [`interviews::InterviewRepository`] | `entretiens` |
//! | [`interviews::RecordingRepository`] | `enregistrements` |
//! | [`security::BlacklistRepository`] | `token_blacklist` |
//! | [`security::AuthLogRepository`] | `auth_logs` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("jean.dupont@example.fr").await?;
//! ```

pub mod users;
pub mod candidates;
pub mod companies;
pub mod offers;
pub mod applications;
pub mod interviews;
pub mod security;

use mongodb::bson::oid::ObjectId;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::results::InsertOneResult;
use crate::core::errors::AppError;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 고유 인덱스 위반 여부
pub(crate) fn is_duplicate_key_error(error: &MongoError) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// 고유 인덱스 위반은 `ConflictError(message)`로, 나머지는 `DatabaseError`로 바꿉니다.
pub(crate) fn map_write_error(error: MongoError, conflict_message: &str) -> AppError {
    if is_duplicate_key_error(&error) {
        AppError::ConflictError(conflict_message.to_string())
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

pub(crate) fn inserted_object_id(result: &InsertOneResult) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("Identifiant inséré inattendu".to_string()))
}

/// 모든 컬렉션의 인덱스를 생성합니다. `main`에서 레지스트리 초기화 직후 호출합니다.
pub async fn create_all_indexes() -> Result<(), AppError> {
    users::UserRepository::instance().create_indexes().await?;
    candidates::CandidateRepository::instance().create_indexes().await?;
    companies::CompanyRepository::instance().create_indexes().await?;
    offers::OfferRepository::instance().create_indexes().await?;
    applications::ApplicationRepository::instance().create_indexes().await?;
    interviews::InterviewRepository::instance().create_indexes().await?;
    interviews::RecordingRepository::instance().create_indexes().await?;
    security::BlacklistRepository::instance().create_indexes().await?;
    security::AuthLogRepository::instance().create_indexes().await?;

    log::info!("✅ Index MongoDB créés");
    Ok(())
}
