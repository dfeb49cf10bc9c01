//! 지원서 API DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::common::FileInfoResponse;
use crate::domain::entities::applications::{Application, ApplicationStatus};
use crate::utils::bson_utils::{id_to_hex, to_rfc3339};

fn validate_application_status(value: &str) -> Result<(), ValidationError> {
    ApplicationStatus::from_str(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("invalid_application_status")
            .with_message("Statut invalide ('en_attente', 'Accepté' ou 'Refusé')".into())
    })
}

/// `PUT /api/recruteur/candidatures/{id}/statut`
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateApplicationStatusRequest {
    #[validate(custom(function = "validate_application_status"))]
    pub statut: String,
}

/// 지원자 정보 (채용 담당자용 목록에 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantSummary {
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub telephone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub offre_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_titre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entreprise_nom: Option<String>,
    pub candidat_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidat: Option<ApplicantSummary>,
    pub lettre_motivation: Option<String>,
    pub cv: FileInfoResponse,
    pub statut: ApplicationStatus,
    pub date_candidature: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: id_to_hex(&application.id),
            offre_id: application.offre_id.to_hex(),
            offre_titre: None,
            entreprise_nom: None,
            candidat_id: application.candidat_id.to_hex(),
            candidat: None,
            lettre_motivation: application.lettre_motivation,
            cv: FileInfoResponse::from(&application.cv),
            statut: application.statut,
            date_candidature: to_rfc3339(&application.date_candidature),
            updated_at: to_rfc3339(&application.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_request_validation() {
        assert!(UpdateApplicationStatusRequest { statut: "Accepté".to_string() }.validate().is_ok());
        assert!(UpdateApplicationStatusRequest { statut: "refuse".to_string() }.validate().is_ok());
        assert!(UpdateApplicationStatusRequest { statut: "peut-être".to_string() }.validate().is_err());
    }
}
