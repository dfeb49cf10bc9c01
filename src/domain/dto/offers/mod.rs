//! 채용 공고 API DTO (`/api/offres-emploi`, `/api/recruteur/offres`)

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::common::Pagination;
use crate::domain::entities::offers::{ContractType, JobOffer, OfferStatus};
use crate::utils::bson_utils::{id_to_hex, to_rfc3339, to_rfc3339_opt};
use crate::utils::string_utils::deserialize_optional_string;

fn validate_contract_type(value: &str) -> Result<(), ValidationError> {
    ContractType::from_str(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("invalid_contract_type")
            .with_message("Type de contrat invalide (CDI, CDD, Stage, Alternance, Freelance)".into())
    })
}

fn validate_offer_status(value: &str) -> Result<(), ValidationError> {
    OfferStatus::from_str(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("invalid_offer_status")
            .with_message("Statut invalide ('ouverte' ou 'fermée')".into())
    })
}

fn validate_competences(values: &[String]) -> Result<(), ValidationError> {
    if values.len() > 50 || values.iter().any(|value| value.chars().count() > 100) {
        return Err(ValidationError::new("invalid_competences")
            .with_message("Liste de compétences trop longue".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOfferRequest {
    #[validate(length(min = 1, max = 200, message = "Le titre est obligatoire (200 caractères max)"))]
    pub titre: String,

    #[validate(length(min = 1, max = 20000, message = "La description est obligatoire"))]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub entreprise_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 150, message = "La localisation est trop longue"))]
    pub localisation: Option<String>,

    #[validate(custom(function = "validate_contract_type"))]
    pub type_contrat: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Le salaire est trop long"))]
    pub salaire: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_competences"))]
    pub competences: Vec<String>,

    /// RFC 3339
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date_limite: Option<String>,
}

/// 부분 수정. 지정한 필드만 바뀝니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOfferRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 200, message = "Le titre est trop long"))]
    pub titre: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 20000, message = "La description est trop longue"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub entreprise_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 150, message = "La localisation est trop longue"))]
    pub localisation: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_contract_type"))]
    pub type_contrat: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Le salaire est trop long"))]
    pub salaire: Option<String>,

    #[validate(custom(function = "validate_competences"))]
    pub competences: Option<Vec<String>>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date_limite: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_offer_status"))]
    pub statut: Option<String>,
}

/// 공개 목록 필터
#[derive(Debug, Default, Deserialize)]
pub struct OfferQuery {
    /// 기본값 `ouverte`. `toutes`이면 상태 필터 없음
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub statut: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub localisation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub type_contrat: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub entreprise_id: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl OfferQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, limit: self.limit }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferResponse {
    pub id: String,
    pub titre: String,
    pub description: String,
    pub entreprise_id: Option<String>,
    pub entreprise_nom: Option<String>,
    pub localisation: Option<String>,
    pub type_contrat: ContractType,
    pub salaire: Option<String>,
    pub competences: Vec<String>,
    pub recruteur_id: String,
    pub statut: OfferStatus,
    pub date_publication: String,
    pub date_limite: Option<String>,
    pub updated_at: String,
}

impl From<JobOffer> for OfferResponse {
    fn from(offer: JobOffer) -> Self {
        Self {
            id: id_to_hex(&offer.id),
            titre: offer.titre,
            description: offer.description,
            entreprise_id: offer.entreprise_id.map(|id| id.to_hex()),
            entreprise_nom: offer.entreprise_nom,
            localisation: offer.localisation,
            type_contrat: offer.type_contrat,
            salaire: offer.salaire,
            competences: offer.competences,
            recruteur_id: offer.recruteur_id.to_hex(),
            statut: offer.statut,
            date_publication: to_rfc3339(&offer.date_publication),
            date_limite: to_rfc3339_opt(&offer.date_limite),
            updated_at: to_rfc3339(&offer.updated_at),
        }
    }
}

/// 채용 담당자 본인 공고 목록 (지원자 수 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruiterOfferResponse {
    #[serde(flatten)]
    pub offre: OfferResponse,
    pub nombre_candidatures: u64,
    pub nombre_en_attente: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_offer_validation() {
        let valid: CreateOfferRequest = serde_json::from_str(r#"{
            "titre": "Développeur Rust",
            "description": "API de recrutement",
            "type_contrat": "CDI",
            "competences": ["rust", "mongodb"]
        }"#).unwrap();
        assert!(valid.validate().is_ok());

        let bad_contract: CreateOfferRequest = serde_json::from_str(r#"{
            "titre": "Développeur Rust",
            "description": "API",
            "type_contrat": "Interim"
        }"#).unwrap();
        assert!(bad_contract.validate().is_err());
    }

    #[test]
    fn test_update_offer_status_validation() {
        let closing: UpdateOfferRequest = serde_json::from_str(r#"{"statut": "fermée"}"#).unwrap();
        assert!(closing.validate().is_ok());

        let unknown: UpdateOfferRequest = serde_json::from_str(r#"{"statut": "supprimée"}"#).unwrap();
        assert!(unknown.validate().is_err());
    }
}
