use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::files::StoredFile;

/// 지원 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "en_attente")]
    EnAttente,
    #[serde(rename = "Accepté")]
    Accepte,
    #[serde(rename = "Refusé")]
    Refuse,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::EnAttente => "en_attente",
            ApplicationStatus::Accepte => "Accepté",
            ApplicationStatus::Refuse => "Refusé",
        }
    }

    /// 저장 형식(`en_attente`, `Accepté`, `Refusé`)과 악센트 없는 표기를 모두 허용합니다.
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en_attente" | "en attente" | "pending" => Some(ApplicationStatus::EnAttente),
            "accepté" | "accepte" | "accepted" => Some(ApplicationStatus::Accepte),
            "refusé" | "refuse" | "rejected" => Some(ApplicationStatus::Refuse),
            _ => None,
        }
    }
}

/// 지원서 (Candidature)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub offre_id: ObjectId,
    pub candidat_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lettre_motivation: Option<String>,
    pub cv: StoredFile,
    /// 프로필 CV를 재사용한 경우 true (철회 시 파일을 지우지 않음)
    #[serde(default)]
    pub cv_from_profile: bool,
    pub statut: ApplicationStatus,
    pub date_candidature: DateTime,
    pub updated_at: DateTime,
}

impl Application {
    pub fn new(
        offre_id: ObjectId,
        candidat_id: ObjectId,
        lettre_motivation: Option<String>,
        cv: StoredFile,
        cv_from_profile: bool,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            offre_id,
            candidat_id,
            lettre_motivation,
            cv,
            cv_from_profile,
            statut: ApplicationStatus::EnAttente,
            date_candidature: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, candidat_id: &ObjectId) -> bool {
        &self.candidat_id == candidat_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_parsing() {
        assert_eq!(ApplicationStatus::from_str("en_attente"), Some(ApplicationStatus::EnAttente));
        assert_eq!(ApplicationStatus::from_str("Accepté"), Some(ApplicationStatus::Accepte));
        assert_eq!(ApplicationStatus::from_str("accepte"), Some(ApplicationStatus::Accepte));
        assert_eq!(ApplicationStatus::from_str("REFUSÉ"), Some(ApplicationStatus::Refuse));
        assert_eq!(ApplicationStatus::from_str("embauché"), None);
    }

    #[test]
    fn test_application_status_serialization() {
        assert_eq!(serde_json::to_string(&ApplicationStatus::Accepte).unwrap(), "\"Accepté\"");
        assert_eq!(serde_json::to_string(&ApplicationStatus::EnAttente).unwrap(), "\"en_attente\"");
        let status: ApplicationStatus = serde_json::from_str("\"Refusé\"").unwrap();
        assert_eq!(status, ApplicationStatus::Refuse);
    }

    #[test]
    fn test_new_application_is_pending() {
        let cv = StoredFile {
            key: "cv/a.pdf".to_string(),
            original_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 10,
            backend: "local".to_string(),
        };
        let candidat = ObjectId::new();
        let application = Application::new(ObjectId::new(), candidat, None, cv, false);

        assert_eq!(application.statut, ApplicationStatus::EnAttente);
        assert!(application.is_owned_by(&candidat));
        assert!(!application.is_owned_by(&ObjectId::new()));
    }
}
