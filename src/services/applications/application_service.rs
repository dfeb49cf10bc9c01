//! # 지원서 서비스
//!
//! 지원자의 지원/조회/철회와 채용 담당자의 지원자 목록, 상태 변경,
//! CV 다운로드를 담당합니다.
//!
//! ## CV 파일 공유
//!
//! 지원 시 파일을 보내지 않으면 프로필 CV를 그대로 참조합니다
//! (`cv_from_profile = true`). 이런 지원서를 지울 때는 다른 지원서나 현재 프로필이
//! 더 이상 쓰지 않는 경우에만 파일을 지웁니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    config::UploadConfig,
    core::errors::AppError,
    domain::dto::applications::{ApplicantSummary, ApplicationResponse, UpdateApplicationStatusRequest},
    domain::entities::applications::{Application, ApplicationStatus},
    domain::entities::files::StoredFile,
    domain::entities::offers::{JobOffer, OfferStatus},
    domain::models::auth::AuthenticatedUser,
    repositories::applications::{ApplicationRepository, DUPLICATE_APPLICATION},
    repositories::candidates::CandidateRepository,
    repositories::offers::OfferRepository,
    repositories::users::UserRepository,
    services::access::{ensure_application_owner, ensure_offer_owner},
    services::candidates::{release_cv, CV_CATEGORY},
    storage::UploadStore,
    utils::bson_utils::parse_object_id,
    utils::multipart::{validate_upload, MultipartForm, CV_EXTENSIONS},
};

/// 지원 동기 최대 길이 (문자 수)
pub const MAX_COVER_LETTER_CHARS: usize = 5000;

/// 공고가 지원을 받을 수 있는지 확인합니다.
pub fn ensure_accepting_applications(offer: &JobOffer, now: DateTime) -> Result<(), AppError> {
    if offer.statut == OfferStatus::Fermee {
        return Err(AppError::ValidationError("Cette offre n'accepte plus de candidatures".to_string()));
    }
    if !offer.accepts_applications_at(now) {
        return Err(AppError::ValidationError("La date limite de candidature est dépassée".to_string()));
    }
    Ok(())
}

fn validate_cover_letter(lettre: Option<String>) -> Result<Option<String>, AppError> {
    match lettre {
        Some(lettre) if lettre.chars().count() > MAX_COVER_LETTER_CHARS => Err(AppError::ValidationError(format!(
            "La lettre de motivation ne doit pas dépasser {} caractères",
            MAX_COVER_LETTER_CHARS
        ))),
        other => Ok(other),
    }
}

#[service(name = "application")]
pub struct ApplicationService {
    application_repo: Arc<ApplicationRepository>,
    offer_repo: Arc<OfferRepository>,
    candidate_repo: Arc<CandidateRepository>,
    user_repo: Arc<UserRepository>,
    upload_store: Arc<UploadStore>,
}

impl ApplicationService {
    /// 공고에 지원합니다.
    ///
    /// 업로드한 CV가 없으면 프로필 CV를 쓰고, 둘 다 없으면 400입니다.
    /// 저장 단계에서 실패하면 방금 올린 파일을 지웁니다.
    pub async fn apply(&self, user: &AuthenticatedUser, offre_id: &str, mut form: MultipartForm) -> Result<ApplicationResponse, AppError> {
        let candidat_id = user.object_id()?;
        let offre_id = parse_object_id(offre_id, "offre")?;
        let offer = self.find_offer(&offre_id).await?;

        ensure_accepting_applications(&offer, DateTime::now())?;

        if self.application_repo.exists_for(&offre_id, &candidat_id).await? {
            return Err(AppError::ConflictError(DUPLICATE_APPLICATION.to_string()));
        }

        let lettre_motivation = validate_cover_letter(form.text("lettre_motivation"))?;

        let (cv, cv_from_profile) = match form.file("cv") {
            Some(file) => {
                let extension = validate_upload(&file, CV_EXTENSIONS, UploadConfig::max_cv_bytes())?;
                (self.upload_store.save(CV_CATEGORY, file, &extension).await?, false)
            }
            None => {
                let profile_cv = self.candidate_repo
                    .find_by_user(&candidat_id)
                    .await?
                    .and_then(|profile| profile.cv)
                    .ok_or_else(|| AppError::ValidationError(
                        "Un CV est obligatoire (joignez un fichier ou ajoutez-en un à votre profil)".to_string(),
                    ))?;
                (profile_cv, true)
            }
        };

        let application = Application::new(offre_id, candidat_id, lettre_motivation, cv.clone(), cv_from_profile);
        let application = match self.application_repo.create(application).await {
            Ok(application) => application,
            Err(e) => {
                if !cv_from_profile {
                    self.upload_store.remove(&cv).await;
                }
                return Err(e);
            }
        };

        log::info!("📨 Nouvelle candidature de {} pour '{}'", user.email, offer.titre);

        let mut response = ApplicationResponse::from(application);
        response.offre_titre = Some(offer.titre);
        response.entreprise_nom = offer.entreprise_nom;
        Ok(response)
    }

    /// 내 지원서 목록 (공고 제목 포함, 최신순)
    pub async fn my_applications(&self, user: &AuthenticatedUser) -> Result<Vec<ApplicationResponse>, AppError> {
        let candidat_id = user.object_id()?;
        let applications = self.application_repo.find_by_candidate(&candidat_id).await?;

        let offre_ids: Vec<ObjectId> = applications.iter().map(|application| application.offre_id).collect();
        let offers: HashMap<ObjectId, JobOffer> = self.offer_repo
            .find_by_ids(&offre_ids)
            .await?
            .into_iter()
            .filter_map(|offer| offer.id.map(|id| (id, offer)))
            .collect();

        Ok(applications
            .into_iter()
            .map(|application| {
                let offer = offers.get(&application.offre_id);
                let mut response = ApplicationResponse::from(application);
                response.offre_titre = offer.map(|offer| offer.titre.clone());
                response.entreprise_nom = offer.and_then(|offer| offer.entreprise_nom.clone());
                response
            })
            .collect())
    }

    /// 지원 철회 (본인, `en_attente` 상태만)
    pub async fn withdraw(&self, user: &AuthenticatedUser, id: &str) -> Result<(), AppError> {
        let application = self.find_application(id).await?;
        ensure_application_owner(&application, &user.object_id()?)?;

        if application.statut != ApplicationStatus::EnAttente {
            return Err(AppError::ValidationError(
                "Seules les candidatures en attente peuvent être retirées".to_string(),
            ));
        }

        if let Some(application_id) = application.id {
            self.application_repo.delete(&application_id).await?;
        }
        if application.cv_from_profile {
            release_cv(&self.application_repo, &self.candidate_repo, &self.upload_store, &application.candidat_id, &application.cv).await;
        } else {
            self.upload_store.remove(&application.cv).await;
        }

        log::info!("↩️ Candidature retirée par {}", user.email);
        Ok(())
    }

    /// 공고의 지원자 목록 (공고 작성자만, 지원 순)
    pub async fn offer_applications(&self, user: &AuthenticatedUser, offre_id: &str) -> Result<Vec<ApplicationResponse>, AppError> {
        let offre_id = parse_object_id(offre_id, "offre")?;
        let offer = self.find_offer(&offre_id).await?;
        ensure_offer_owner(&offer, &user.object_id()?)?;

        let applications = self.application_repo.find_by_offer(&offre_id).await?;
        let candidat_ids: Vec<ObjectId> = applications.iter().map(|application| application.candidat_id).collect();
        let candidates: HashMap<ObjectId, ApplicantSummary> = self.user_repo
            .find_by_ids(&candidat_ids)
            .await?
            .into_iter()
            .filter_map(|candidate| {
                let id = candidate.id?;
                Some((id, ApplicantSummary {
                    id: id.to_hex(),
                    nom: candidate.nom,
                    prenom: candidate.prenom,
                    email: candidate.email,
                    telephone: candidate.telephone,
                }))
            })
            .collect();

        Ok(applications
            .into_iter()
            .map(|application| {
                let candidat = candidates.get(&application.candidat_id).cloned();
                let mut response = ApplicationResponse::from(application);
                response.offre_titre = Some(offer.titre.clone());
                response.candidat = candidat;
                response
            })
            .collect())
    }

    /// 지원서 상태 변경 (공고 작성자만)
    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: &str,
        request: UpdateApplicationStatusRequest,
    ) -> Result<ApplicationResponse, AppError> {
        let statut = ApplicationStatus::from_str(&request.statut).ok_or_else(|| {
            AppError::ValidationError(format!("Statut de candidature inconnu: '{}'", request.statut))
        })?;

        let application = self.find_application(id).await?;
        let offer = self.find_offer(&application.offre_id).await?;
        ensure_offer_owner(&offer, &user.object_id()?)?;

        let application_id = application
            .id
            .ok_or_else(|| AppError::InternalError("Candidature sans identifiant".to_string()))?;

        let updated = self.application_repo
            .update_status(&application_id, statut)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidature introuvable".to_string()))?;

        log::info!("📋 Candidature {} passée à '{}' par {}", application_id, statut.as_str(), user.email);

        let mut response = ApplicationResponse::from(updated);
        response.offre_titre = Some(offer.titre);
        Ok(response)
    }

    /// CV 다운로드 (지원자 본인 또는 공고 작성자)
    pub async fn download_cv(&self, user: &AuthenticatedUser, id: &str) -> Result<(StoredFile, Vec<u8>), AppError> {
        let application = self.find_application(id).await?;
        let user_id = user.object_id()?;

        if !application.is_owned_by(&user_id) {
            let offer = self.find_offer(&application.offre_id).await?;
            ensure_offer_owner(&offer, &user_id).map_err(|_| {
                AppError::AuthorizationError("Vous n'avez pas accès à ce CV".to_string())
            })?;
        }

        let bytes = self.upload_store.read(&application.cv).await?;
        Ok((application.cv, bytes))
    }

    pub async fn find_application(&self, id: &str) -> Result<Application, AppError> {
        let application_id = parse_object_id(id, "candidature")?;

        self.application_repo
            .find_by_id(&application_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidature introuvable".to_string()))
    }

    async fn find_offer(&self, offre_id: &ObjectId) -> Result<JobOffer, AppError> {
        self.offer_repo
            .find_by_id(offre_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Offre d'emploi introuvable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::offers::ContractType;

    fn offer(statut: OfferStatus, date_limite: Option<DateTime>) -> JobOffer {
        let now = DateTime::now();
        JobOffer {
            id: Some(ObjectId::new()),
            titre: "Data engineer".to_string(),
            description: "Pipelines".to_string(),
            entreprise_id: None,
            entreprise_nom: None,
            localisation: None,
            type_contrat: ContractType::Alternance,
            salaire: None,
            competences: vec![],
            recruteur_id: ObjectId::new(),
            statut,
            date_publication: now,
            date_limite,
            updated_at: now,
        }
    }

    #[test]
    fn test_closed_offer_rejects_applications() {
        let err = ensure_accepting_applications(&offer(OfferStatus::Fermee, None), DateTime::now()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_deadline_is_enforced() {
        let now = DateTime::now();
        let yesterday = DateTime::from_millis(now.timestamp_millis() - 86_400_000);
        let tomorrow = DateTime::from_millis(now.timestamp_millis() + 86_400_000);

        assert!(ensure_accepting_applications(&offer(OfferStatus::Ouverte, Some(yesterday)), now).is_err());
        assert!(ensure_accepting_applications(&offer(OfferStatus::Ouverte, Some(tomorrow)), now).is_ok());
        assert!(ensure_accepting_applications(&offer(OfferStatus::Ouverte, None), now).is_ok());
    }

    #[test]
    fn test_cover_letter_length() {
        assert_eq!(validate_cover_letter(None).unwrap(), None);
        assert!(validate_cover_letter(Some("é".repeat(MAX_COVER_LETTER_CHARS))).is_ok());
        assert!(validate_cover_letter(Some("a".repeat(MAX_COVER_LETTER_CHARS + 1))).is_err());
    }
}
