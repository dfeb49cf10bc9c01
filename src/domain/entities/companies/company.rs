use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 고유 인덱스 (대소문자 구분 없이 비교하기 위해 `nom_normalise`도 저장)
    pub nom: String,
    pub nom_normalise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secteur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localisation: Option<String>,
    pub created_by: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Company {
    pub fn new(nom: String, created_by: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            nom_normalise: Self::normalize_name(&nom),
            nom,
            description: None,
            secteur: None,
            site_web: None,
            localisation: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn normalize_name(nom: &str) -> String {
        nom.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(Company::normalize_name("  Acme   Conseil "), "acme conseil");
        assert_eq!(Company::normalize_name("ACME CONSEIL"), Company::normalize_name("acme conseil"));
    }
}
