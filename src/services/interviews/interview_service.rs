//! # 면접 서비스
//!
//! 채용 담당자가 지원서에 대해 면접을 잡고, 두 참여자가 일정을 조회하며,
//! 면접이 끝나면 녹화 영상을 올립니다. 녹화가 올라오면 면접은 `terminé`가 됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use singleton_macro::service;
use crate::{
    config::UploadConfig,
    core::errors::AppError,
    domain::dto::interviews::{
        CreateInterviewRequest, InterviewQuery, InterviewResponse, RecordingResponse, UpdateInterviewRequest,
        DEFAULT_INTERVIEW_MINUTES,
    },
    domain::entities::applications::ApplicationStatus,
    domain::entities::interviews::{Interview, InterviewMode, InterviewStatus, Recording},
    domain::models::auth::AuthenticatedUser,
    repositories::applications::ApplicationRepository,
    repositories::interviews::{InterviewRepository, RecordingRepository},
    repositories::offers::OfferRepository,
    services::access::{ensure_interview_organizer, ensure_interview_participant, ensure_interview_viewer, ensure_offer_owner},
    storage::UploadStore,
    utils::bson_utils::{parse_object_id, parse_rfc3339, set_trimmed},
    utils::multipart::{validate_upload, MultipartForm, VIDEO_EXTENSIONS},
    utils::string_utils::clean_optional_string,
};

/// 녹화 영상이 저장되는 업로드 분류
pub const VIDEO_CATEGORY: &str = "videos";

const MIN_INTERVIEW_MINUTES: i32 = 15;
const MAX_INTERVIEW_MINUTES: i32 = 480;

/// 면접 시각은 현재 이후여야 합니다.
pub fn parse_interview_date(value: &str, now: DateTime) -> Result<DateTime, AppError> {
    let date = parse_rfc3339(value, "date_entretien")?;
    if date <= now {
        return Err(AppError::ValidationError("La date de l'entretien doit être dans le futur".to_string()));
    }
    Ok(date)
}

fn parse_duration(value: Option<i32>) -> Result<i32, AppError> {
    let minutes = value.unwrap_or(DEFAULT_INTERVIEW_MINUTES);
    if !(MIN_INTERVIEW_MINUTES..=MAX_INTERVIEW_MINUTES).contains(&minutes) {
        return Err(AppError::ValidationError(format!(
            "La durée doit être comprise entre {} et {} minutes",
            MIN_INTERVIEW_MINUTES, MAX_INTERVIEW_MINUTES
        )));
    }
    Ok(minutes)
}

fn parse_mode(value: &str) -> Result<InterviewMode, AppError> {
    InterviewMode::from_str(value)
        .ok_or_else(|| AppError::ValidationError(format!("Mode d'entretien inconnu: '{}'", value)))
}

fn parse_status_filter(value: Option<&str>) -> Result<Option<InterviewStatus>, AppError> {
    value
        .map(|statut| {
            InterviewStatus::from_str(statut)
                .ok_or_else(|| AppError::ValidationError(format!("Statut d'entretien inconnu: '{}'", statut)))
        })
        .transpose()
}

#[service(name = "interview")]
pub struct InterviewService {
    interview_repo: Arc<InterviewRepository>,
    recording_repo: Arc<RecordingRepository>,
    application_repo: Arc<ApplicationRepository>,
    offer_repo: Arc<OfferRepository>,
    upload_store: Arc<UploadStore>,
}

impl InterviewService {
    /// 면접 일정 생성 (해당 공고 작성자만)
    pub async fn schedule(&self, user: &AuthenticatedUser, request: CreateInterviewRequest) -> Result<InterviewResponse, AppError> {
        let recruteur_id = user.object_id()?;
        let candidature_id = parse_object_id(&request.candidature_id, "candidature")?;

        let application = self.application_repo
            .find_by_id(&candidature_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidature introuvable".to_string()))?;
        let offer = self.offer_repo
            .find_by_id(&application.offre_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Offre d'emploi introuvable".to_string()))?;

        ensure_offer_owner(&offer, &recruteur_id)?;

        if application.statut == ApplicationStatus::Refuse {
            return Err(AppError::ValidationError(
                "Impossible de planifier un entretien pour une candidature refusée".to_string(),
            ));
        }

        let now = DateTime::now();
        let interview = Interview {
            id: None,
            candidature_id,
            offre_id: application.offre_id,
            candidat_id: application.candidat_id,
            recruteur_id,
            date_entretien: parse_interview_date(&request.date_entretien, now)?,
            duree_minutes: parse_duration(request.duree_minutes)?,
            mode: parse_mode(&request.mode)?,
            lieu: clean_optional_string(request.lieu),
            lien_visio: clean_optional_string(request.lien_visio),
            notes: clean_optional_string(request.notes),
            statut: InterviewStatus::Planifie,
            created_at: now,
            updated_at: now,
        };

        let interview = self.interview_repo.create(interview).await?;
        log::info!("📅 Entretien planifié pour '{}' par {}", offer.titre, user.email);

        let mut response = InterviewResponse::from(interview);
        response.offre_titre = Some(offer.titre);
        Ok(response)
    }

    /// 채용 담당자 본인이 잡은 면접 (가까운 순)
    pub async fn list_for_recruiter(&self, user: &AuthenticatedUser, query: &InterviewQuery) -> Result<Vec<InterviewResponse>, AppError> {
        let statut = parse_status_filter(query.statut.as_deref())?;
        let interviews = self.interview_repo.find_by_recruiter(&user.object_id()?, statut).await?;
        self.with_offer_titles(interviews).await
    }

    /// 지원자 본인의 면접 (가까운 순)
    pub async fn list_for_candidate(&self, user: &AuthenticatedUser, query: &InterviewQuery) -> Result<Vec<InterviewResponse>, AppError> {
        let statut = parse_status_filter(query.statut.as_deref())?;
        let interviews = self.interview_repo.find_by_candidate(&user.object_id()?, statut).await?;
        self.with_offer_titles(interviews).await
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: &str) -> Result<InterviewResponse, AppError> {
        let interview = self.find_interview(id).await?;
        ensure_interview_viewer(&interview, user)?;

        let mut responses = self.with_offer_titles(vec![interview]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::InternalError("Entretien perdu lors de la lecture".to_string()))
    }

    /// 일정/장소/메모/상태 수정 (면접을 잡은 채용 담당자만)
    pub async fn update(&self, user: &AuthenticatedUser, id: &str, request: UpdateInterviewRequest) -> Result<InterviewResponse, AppError> {
        let interview = self.find_interview(id).await?;
        ensure_interview_organizer(&interview, &user.object_id()?)?;

        let mut update_doc = doc! { "updated_at": DateTime::now() };

        if let Some(date_entretien) = request.date_entretien {
            update_doc.insert("date_entretien", parse_interview_date(&date_entretien, DateTime::now())?);
        }
        if let Some(duree_minutes) = request.duree_minutes {
            update_doc.insert("duree_minutes", parse_duration(Some(duree_minutes))?);
        }
        if let Some(mode) = request.mode {
            update_doc.insert("mode", parse_mode(&mode)?.as_str());
        }
        set_trimmed(&mut update_doc, "lieu", request.lieu);
        set_trimmed(&mut update_doc, "lien_visio", request.lien_visio);
        set_trimmed(&mut update_doc, "notes", request.notes);
        if let Some(statut) = parse_status_filter(request.statut.as_deref())? {
            update_doc.insert("statut", statut.as_str());
        }

        self.apply_update(&interview, update_doc).await
    }

    /// 면접 취소. 문서는 남기고 상태만 `annulé`로 바꿉니다.
    pub async fn cancel(&self, user: &AuthenticatedUser, id: &str) -> Result<InterviewResponse, AppError> {
        let interview = self.find_interview(id).await?;
        ensure_interview_organizer(&interview, &user.object_id()?)?;

        let response = self
            .apply_update(&interview, doc! {
                "statut": InterviewStatus::Annule.as_str(),
                "updated_at": DateTime::now(),
            })
            .await?;

        log::info!("🚫 Entretien {} annulé par {}", response.id, user.email);
        Ok(response)
    }

    /// 녹화 업로드 (참여자만, 취소된 면접은 400)
    pub async fn add_recording(&self, user: &AuthenticatedUser, id: &str, mut form: MultipartForm) -> Result<RecordingResponse, AppError> {
        let uploaded_by = user.object_id()?;
        let interview = self.find_interview(id).await?;
        ensure_interview_participant(&interview, &uploaded_by)?;

        if interview.statut == InterviewStatus::Annule {
            return Err(AppError::ValidationError(
                "Impossible d'ajouter un enregistrement à un entretien annulé".to_string(),
            ));
        }

        let entretien_id = interview
            .id
            .ok_or_else(|| AppError::InternalError("Entretien sans identifiant".to_string()))?;
        let file = form
            .file("video")
            .ok_or_else(|| AppError::ValidationError("Le fichier 'video' est obligatoire".to_string()))?;
        let extension = validate_upload(&file, VIDEO_EXTENSIONS, UploadConfig::max_video_bytes())?;
        let transcription = form.text("transcription");

        let video = self.upload_store.save(VIDEO_CATEGORY, file, &extension).await?;
        let recording = Recording {
            id: None,
            entretien_id,
            uploaded_by,
            video: video.clone(),
            transcription,
            created_at: DateTime::now(),
        };

        let recording = match self.recording_repo.create(recording).await {
            Ok(recording) => recording,
            Err(e) => {
                self.upload_store.remove(&video).await;
                return Err(e);
            }
        };

        self.interview_repo
            .update(&entretien_id, doc! {
                "statut": InterviewStatus::Termine.as_str(),
                "updated_at": DateTime::now(),
            })
            .await?;

        log::info!("🎥 Enregistrement ajouté à l'entretien {} par {}", entretien_id, user.email);
        Ok(RecordingResponse::from(recording))
    }

    pub async fn list_recordings(&self, user: &AuthenticatedUser, id: &str) -> Result<Vec<RecordingResponse>, AppError> {
        let interview = self.find_interview(id).await?;
        ensure_interview_viewer(&interview, user)?;

        let Some(entretien_id) = interview.id else {
            return Ok(Vec::new());
        };

        Ok(self.recording_repo
            .find_by_interview(&entretien_id)
            .await?
            .into_iter()
            .map(RecordingResponse::from)
            .collect())
    }

    async fn find_interview(&self, id: &str) -> Result<Interview, AppError> {
        let interview_id = parse_object_id(id, "entretien")?;

        self.interview_repo
            .find_by_id(&interview_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entretien introuvable".to_string()))
    }

    async fn apply_update(&self, interview: &Interview, update_doc: Document) -> Result<InterviewResponse, AppError> {
        let interview_id = interview
            .id
            .ok_or_else(|| AppError::InternalError("Entretien sans identifiant".to_string()))?;

        let updated = self.interview_repo
            .update(&interview_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Entretien introuvable".to_string()))?;

        let mut responses = self.with_offer_titles(vec![updated]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::InternalError("Entretien perdu lors de la lecture".to_string()))
    }

    async fn with_offer_titles(&self, interviews: Vec<Interview>) -> Result<Vec<InterviewResponse>, AppError> {
        let offre_ids: Vec<ObjectId> = interviews.iter().map(|interview| interview.offre_id).collect();
        let titles: HashMap<ObjectId, String> = self.offer_repo
            .find_by_ids(&offre_ids)
            .await?
            .into_iter()
            .filter_map(|offer| offer.id.map(|id| (id, offer.titre)))
            .collect();

        Ok(interviews
            .into_iter()
            .map(|interview| {
                let titre = titles.get(&interview.offre_id).cloned();
                let mut response = InterviewResponse::from(interview);
                response.offre_titre = titre;
                response
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_date_must_be_future() {
        let now = DateTime::now();
        assert!(parse_interview_date("2020-06-01T10:00:00Z", now).is_err());
        assert!(parse_interview_date("2999-06-01T10:00:00+02:00", now).is_ok());
        assert!(parse_interview_date("demain", now).is_err());
    }

    #[test]
    fn test_duration_defaults_and_bounds() {
        assert_eq!(parse_duration(None).unwrap(), DEFAULT_INTERVIEW_MINUTES);
        assert_eq!(parse_duration(Some(15)).unwrap(), 15);
        assert!(parse_duration(Some(10)).is_err());
        assert!(parse_duration(Some(481)).is_err());
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("annulé")).unwrap(), Some(InterviewStatus::Annule));
        assert!(parse_status_filter(Some("reporté")).is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(parse_mode("visio").unwrap(), InterviewMode::Visio);
        assert!(parse_mode("pigeon").is_err());
    }
}
