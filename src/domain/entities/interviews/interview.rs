use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 면접 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
    #[serde(rename = "planifié")]
    Planifie,
    #[serde(rename = "terminé")]
    Termine,
    #[serde(rename = "annulé")]
    Annule,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Planifie => "planifié",
            InterviewStatus::Termine => "terminé",
            InterviewStatus::Annule => "annulé",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "planifié" | "planifie" | "scheduled" => Some(InterviewStatus::Planifie),
            "terminé" | "termine" | "completed" => Some(InterviewStatus::Termine),
            "annulé" | "annule" | "cancelled" | "canceled" => Some(InterviewStatus::Annule),
            _ => None,
        }
    }
}

/// 면접 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    Presentiel,
    Visio,
    Telephone,
}

impl InterviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Presentiel => "presentiel",
            InterviewMode::Visio => "visio",
            InterviewMode::Telephone => "telephone",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "presentiel" | "présentiel" | "onsite" => Some(InterviewMode::Presentiel),
            "visio" | "video" | "visioconférence" => Some(InterviewMode::Visio),
            "telephone" | "téléphone" | "phone" => Some(InterviewMode::Telephone),
            _ => None,
        }
    }
}

/// 면접 (Entretien)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub candidature_id: ObjectId,
    pub offre_id: ObjectId,
    pub candidat_id: ObjectId,
    pub recruteur_id: ObjectId,
    pub date_entretien: DateTime,
    pub duree_minutes: i32,
    pub mode: InterviewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lieu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lien_visio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub statut: InterviewStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Interview {
    pub fn is_participant(&self, user_id: &ObjectId) -> bool {
        &self.candidat_id == user_id || &self.recruteur_id == user_id
    }

    pub fn is_organized_by(&self, user_id: &ObjectId) -> bool {
        &self.recruteur_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_status_parsing() {
        assert_eq!(InterviewStatus::from_str("planifié"), Some(InterviewStatus::Planifie));
        assert_eq!(InterviewStatus::from_str("TERMINE"), Some(InterviewStatus::Termine));
        assert_eq!(InterviewStatus::from_str("annulé"), Some(InterviewStatus::Annule));
        assert_eq!(InterviewStatus::from_str("reporté"), None);
        assert_eq!(serde_json::to_string(&InterviewStatus::Annule).unwrap(), "\"annulé\"");
    }

    #[test]
    fn test_interview_mode_parsing() {
        assert_eq!(InterviewMode::from_str("Présentiel"), Some(InterviewMode::Presentiel));
        assert_eq!(InterviewMode::from_str("visio"), Some(InterviewMode::Visio));
        assert_eq!(InterviewMode::from_str("fax"), None);
        assert_eq!(serde_json::to_string(&InterviewMode::Telephone).unwrap(), "\"telephone\"");
    }

    #[test]
    fn test_participants() {
        let now = DateTime::now();
        let candidat = ObjectId::new();
        let recruteur = ObjectId::new();
        let interview = Interview {
            id: None,
            candidature_id: ObjectId::new(),
            offre_id: ObjectId::new(),
            candidat_id: candidat,
            recruteur_id: recruteur,
            date_entretien: now,
            duree_minutes: 60,
            mode: InterviewMode::Visio,
            lieu: None,
            lien_visio: None,
            notes: None,
            statut: InterviewStatus::Planifie,
            created_at: now,
            updated_at: now,
        };

        assert!(interview.is_participant(&candidat));
        assert!(interview.is_participant(&recruteur));
        assert!(!interview.is_participant(&ObjectId::new()));
        assert!(interview.is_organized_by(&recruteur));
        assert!(!interview.is_organized_by(&candidat));
    }
}
