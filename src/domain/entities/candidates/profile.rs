use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::files::StoredFile;

/// 지원자 프로필
///
/// `candidat` 역할로 가입할 때 빈 프로필이 함께 만들어지며, 사용자당 하나입니다.
/// 프로필에 올린 CV는 지원 시 파일을 보내지 않으면 재사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titre: Option<String>,
    #[serde(default)]
    pub competences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_annees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niveau_etude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv: Option<StoredFile>,
    pub updated_at: DateTime,
}

impl CandidateProfile {
    pub fn empty(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            titre: None,
            competences: Vec::new(),
            experience_annees: None,
            niveau_etude: None,
            localisation: None,
            cv: None,
            updated_at: DateTime::now(),
        }
    }
}
