use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 공고 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    #[serde(rename = "ouverte")]
    Ouverte,
    #[serde(rename = "fermée")]
    Fermee,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Ouverte => "ouverte",
            OfferStatus::Fermee => "fermée",
        }
    }

    /// `ouverte`/`open`, `fermée`/`fermee`/`closed` (대소문자 무관)
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ouverte" | "open" => Some(OfferStatus::Ouverte),
            "fermée" | "fermee" | "closed" => Some(OfferStatus::Fermee),
            _ => None,
        }
    }
}

/// 계약 형태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "CDI")]
    Cdi,
    #[serde(rename = "CDD")]
    Cdd,
    Stage,
    Alternance,
    Freelance,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Cdi => "CDI",
            ContractType::Cdd => "CDD",
            ContractType::Stage => "Stage",
            ContractType::Alternance => "Alternance",
            ContractType::Freelance => "Freelance",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cdi" => Some(ContractType::Cdi),
            "cdd" => Some(ContractType::Cdd),
            "stage" | "internship" => Some(ContractType::Stage),
            "alternance" => Some(ContractType::Alternance),
            "freelance" => Some(ContractType::Freelance),
            _ => None,
        }
    }
}

/// 채용 공고 (Offre)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOffer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub titre: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entreprise_id: Option<ObjectId>,
    /// 목록 조회에서 조인 없이 보여주기 위해 복제한 회사 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entreprise_nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localisation: Option<String>,
    pub type_contrat: ContractType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salaire: Option<String>,
    #[serde(default)]
    pub competences: Vec<String>,
    pub recruteur_id: ObjectId,
    pub statut: OfferStatus,
    pub date_publication: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_limite: Option<DateTime>,
    pub updated_at: DateTime,
}

impl JobOffer {
    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.recruteur_id == user_id
    }

    /// 지정한 시각 기준으로 지원을 받을 수 있는지
    pub fn accepts_applications_at(&self, now: DateTime) -> bool {
        self.statut == OfferStatus::Ouverte
            && self.date_limite.map_or(true, |limit| limit >= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(statut: OfferStatus, date_limite: Option<DateTime>) -> JobOffer {
        let now = DateTime::now();
        JobOffer {
            id: Some(ObjectId::new()),
            titre: "Développeur Rust".to_string(),
            description: "Backend".to_string(),
            entreprise_id: None,
            entreprise_nom: None,
            localisation: Some("Lyon".to_string()),
            type_contrat: ContractType::Cdi,
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
    fn test_offer_status_parsing() {
        assert_eq!(OfferStatus::from_str("ouverte"), Some(OfferStatus::Ouverte));
        assert_eq!(OfferStatus::from_str("Fermée"), Some(OfferStatus::Fermee));
        assert_eq!(OfferStatus::from_str("fermee"), Some(OfferStatus::Fermee));
        assert_eq!(OfferStatus::from_str("archivée"), None);
    }

    #[test]
    fn test_offer_status_serialization() {
        assert_eq!(serde_json::to_string(&OfferStatus::Fermee).unwrap(), "\"fermée\"");
        let status: OfferStatus = serde_json::from_str("\"ouverte\"").unwrap();
        assert_eq!(status, OfferStatus::Ouverte);
    }

    #[test]
    fn test_contract_type_parsing() {
        assert_eq!(ContractType::from_str("cdi"), Some(ContractType::Cdi));
        assert_eq!(ContractType::from_str("Alternance"), Some(ContractType::Alternance));
        assert_eq!(ContractType::from_str("interim"), None);
        assert_eq!(serde_json::to_string(&ContractType::Cdd).unwrap(), "\"CDD\"");
    }

    #[test]
    fn test_accepts_applications() {
        let now = DateTime::now();
        let yesterday = DateTime::from_millis(now.timestamp_millis() - 86_400_000);
        let tomorrow = DateTime::from_millis(now.timestamp_millis() + 86_400_000);

        assert!(offer(OfferStatus::Ouverte, None).accepts_applications_at(now));
        assert!(offer(OfferStatus::Ouverte, Some(tomorrow)).accepts_applications_at(now));
        assert!(!offer(OfferStatus::Ouverte, Some(yesterday)).accepts_applications_at(now));
        assert!(!offer(OfferStatus::Fermee, None).accepts_applications_at(now));
    }

    #[test]
    fn test_ownership() {
        let offer = offer(OfferStatus::Ouverte, None);
        assert!(offer.is_owned_by(&offer.recruteur_id.clone()));
        assert!(!offer.is_owned_by(&ObjectId::new()));
    }
}
