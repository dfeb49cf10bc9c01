//! 면접 API DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::common::FileInfoResponse;
use crate::domain::entities::interviews::{Interview, InterviewMode, InterviewStatus, Recording};
use crate::utils::bson_utils::{id_to_hex, to_rfc3339};
use crate::utils::string_utils::deserialize_optional_string;

/// 면접 기본 길이 (분)
pub const DEFAULT_INTERVIEW_MINUTES: i32 = 60;

fn validate_mode(value: &str) -> Result<(), ValidationError> {
    InterviewMode::from_str(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("invalid_mode")
            .with_message("Mode invalide ('presentiel', 'visio' ou 'telephone')".into())
    })
}

fn validate_interview_status(value: &str) -> Result<(), ValidationError> {
    InterviewStatus::from_str(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("invalid_interview_status")
            .with_message("Statut invalide ('planifié', 'terminé' ou 'annulé')".into())
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInterviewRequest {
    #[validate(length(equal = 24, message = "Identifiant de candidature invalide"))]
    pub candidature_id: String,

    /// RFC 3339, 미래 시각이어야 합니다
    #[validate(length(min = 1, message = "La date de l'entretien est obligatoire"))]
    pub date_entretien: String,

    #[validate(range(min = 15, max = 480, message = "La durée doit être comprise entre 15 et 480 minutes"))]
    pub duree_minutes: Option<i32>,

    #[validate(custom(function = "validate_mode"))]
    pub mode: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 300, message = "Le lieu est trop long"))]
    pub lieu: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Lien de visioconférence invalide"))]
    pub lien_visio: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "Les notes sont trop longues"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInterviewRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date_entretien: Option<String>,

    #[validate(range(min = 15, max = 480, message = "La durée doit être comprise entre 15 et 480 minutes"))]
    pub duree_minutes: Option<i32>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_mode"))]
    pub mode: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 300, message = "Le lieu est trop long"))]
    pub lieu: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Lien de visioconférence invalide"))]
    pub lien_visio: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "Les notes sont trop longues"))]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_interview_status"))]
    pub statut: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterviewQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub statut: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub id: String,
    pub candidature_id: String,
    pub offre_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_titre: Option<String>,
    pub candidat_id: String,
    pub recruteur_id: String,
    pub date_entretien: String,
    pub duree_minutes: i32,
    pub mode: InterviewMode,
    pub lieu: Option<String>,
    pub lien_visio: Option<String>,
    pub notes: Option<String>,
    pub statut: InterviewStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Interview> for InterviewResponse {
    fn from(interview: Interview) -> Self {
        Self {
            id: id_to_hex(&interview.id),
            candidature_id: interview.candidature_id.to_hex(),
            offre_id: interview.offre_id.to_hex(),
            offre_titre: None,
            candidat_id: interview.candidat_id.to_hex(),
            recruteur_id: interview.recruteur_id.to_hex(),
            date_entretien: to_rfc3339(&interview.date_entretien),
            duree_minutes: interview.duree_minutes,
            mode: interview.mode,
            lieu: interview.lieu,
            lien_visio: interview.lien_visio,
            notes: interview.notes,
            statut: interview.statut,
            created_at: to_rfc3339(&interview.created_at),
            updated_at: to_rfc3339(&interview.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingResponse {
    pub id: String,
    pub entretien_id: String,
    pub uploaded_by: String,
    pub video: FileInfoResponse,
    pub transcription: Option<String>,
    pub created_at: String,
}

impl From<Recording> for RecordingResponse {
    fn from(recording: Recording) -> Self {
        Self {
            id: id_to_hex(&recording.id),
            entretien_id: recording.entretien_id.to_hex(),
            uploaded_by: recording.uploaded_by.to_hex(),
            video: FileInfoResponse::from(&recording.video),
            transcription: recording.transcription,
            created_at: to_rfc3339(&recording.created_at),
        }
    }
}
