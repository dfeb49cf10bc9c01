//! # 지원자 프로필 서비스
//!
//! 프로필 조회/수정과 프로필 CV 교체를 담당합니다.
//!
//! ## CV 파일 정리
//!
//! 프로필 CV는 지원서가 그대로 참조할 수 있습니다 (`cv_from_profile`).
//! 파일은 남은 지원서가 없고 현재 프로필 CV도 아닐 때만 [`release_cv`]가 지웁니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime};
use singleton_macro::service;
use crate::{
    config::UploadConfig,
    core::errors::AppError,
    domain::dto::candidates::{ProfileResponse, UpdateProfileRequest},
    domain::entities::candidates::CandidateProfile,
    domain::entities::files::StoredFile,
    domain::models::auth::AuthenticatedUser,
    repositories::applications::ApplicationRepository,
    repositories::candidates::CandidateRepository,
    storage::UploadStore,
    utils::multipart::{validate_upload, MultipartForm, CV_EXTENSIONS},
    utils::string_utils::clean_optional_string,
};

/// CV가 저장되는 업로드 분류
pub const CV_CATEGORY: &str = "cv";

/// 남은 지원서가 없고 현재 프로필 CV도 아니면 `true`
pub fn is_unreferenced_cv(file: &StoredFile, remaining_applications: u64, profile_cv: Option<&StoredFile>) -> bool {
    remaining_applications == 0 && profile_cv.is_none_or(|current| current.key != file.key)
}

/// 지원서 삭제나 프로필 CV 교체로 떨어져 나온 CV 파일을 정리합니다.
///
/// 문서 삭제가 끝난 뒤 호출합니다. 조회 실패는 파일을 남기고 로그만 기록합니다.
pub async fn release_cv(
    application_repo: &ApplicationRepository,
    candidate_repo: &CandidateRepository,
    upload_store: &UploadStore,
    candidat_id: &ObjectId,
    file: &StoredFile,
) {
    let remaining = match application_repo.count_by_cv_key(&file.key).await {
        Ok(remaining) => remaining,
        Err(e) => {
            log::warn!("⚠️ Références du CV '{}' non vérifiées: {}", file.key, e);
            return;
        }
    };

    let profile_cv = match candidate_repo.find_by_user(candidat_id).await {
        Ok(profile) => profile.and_then(|profile| profile.cv),
        Err(e) => {
            log::warn!("⚠️ Profil du candidat {} non vérifié: {}", candidat_id, e);
            return;
        }
    };

    if is_unreferenced_cv(file, remaining, profile_cv.as_ref()) {
        upload_store.remove(file).await;
    }
}

/// 지원자 프로필과 프로필 CV
#[service(name = "candidate")]
pub struct CandidateService {
    candidate_repo: Arc<CandidateRepository>,
    application_repo: Arc<ApplicationRepository>,
    upload_store: Arc<UploadStore>,
}

impl CandidateService {
    /// 프로필 조회. 가입 전에 만들어진 계정처럼 프로필이 없으면 빈 프로필을 만듭니다.
    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<ProfileResponse, AppError> {
        let user_id = user.object_id()?;
        self.find_or_create(&user_id).await.map(ProfileResponse::from)
    }

    pub async fn find_or_create(&self, user_id: &ObjectId) -> Result<CandidateProfile, AppError> {
        if let Some(profile) = self.candidate_repo.find_by_user(user_id).await? {
            return Ok(profile);
        }
        self.candidate_repo.create(CandidateProfile::empty(*user_id)).await
    }

    pub async fn update_profile(&self, user: &AuthenticatedUser, request: UpdateProfileRequest) -> Result<ProfileResponse, AppError> {
        let user_id = user.object_id()?;
        self.find_or_create(&user_id).await?;

        let mut update_doc = doc! { "updated_at": DateTime::now() };
        if let Some(titre) = clean_optional_string(request.titre) {
            update_doc.insert("titre", titre);
        }
        if let Some(competences) = request.competences {
            let competences: Vec<String> = competences
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect();
            update_doc.insert("competences", competences);
        }
        if let Some(experience_annees) = request.experience_annees {
            update_doc.insert("experience_annees", experience_annees);
        }
        if let Some(niveau_etude) = clean_optional_string(request.niveau_etude) {
            update_doc.insert("niveau_etude", niveau_etude);
        }
        if let Some(localisation) = clean_optional_string(request.localisation) {
            update_doc.insert("localisation", localisation);
        }

        self.candidate_repo
            .update_by_user(&user_id, update_doc)
            .await?
            .map(ProfileResponse::from)
            .ok_or_else(|| AppError::NotFound("Profil candidat introuvable".to_string()))
    }

    /// 프로필 CV 교체
    ///
    /// 이전 파일은 어떤 지원서도 참조하지 않을 때만 지웁니다.
    pub async fn upload_cv(&self, user: &AuthenticatedUser, mut form: MultipartForm) -> Result<ProfileResponse, AppError> {
        let user_id = user.object_id()?;
        let file = form
            .file("cv")
            .ok_or_else(|| AppError::ValidationError("Le fichier 'cv' est obligatoire".to_string()))?;
        let extension = validate_upload(&file, CV_EXTENSIONS, UploadConfig::max_cv_bytes())?;

        let previous = self.find_or_create(&user_id).await?.cv;
        let stored = self.upload_store.save(CV_CATEGORY, file, &extension).await?;

        let updated = match self.set_profile_cv(&user_id, &stored).await {
            Ok(updated) => updated,
            Err(e) => {
                self.upload_store.remove(&stored).await;
                return Err(e);
            }
        };

        if let Some(previous) = previous {
            release_cv(&self.application_repo, &self.candidate_repo, &self.upload_store, &user_id, &previous).await;
        }

        log::info!("📄 CV de profil mis à jour pour {}", user.email);
        Ok(ProfileResponse::from(updated))
    }

    async fn set_profile_cv(&self, user_id: &ObjectId, stored: &StoredFile) -> Result<CandidateProfile, AppError> {
        let cv = to_bson(stored).map_err(|e| AppError::InternalError(e.to_string()))?;

        self.candidate_repo
            .update_by_user(user_id, doc! { "cv": cv, "updated_at": DateTime::now() })
            .await?
            .ok_or_else(|| AppError::NotFound("Profil candidat introuvable".to_string()))
    }
}
