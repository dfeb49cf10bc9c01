//! 지원자 프로필 API DTO (`/api/candidates/profil`, `/api/candidates/cv`)

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::dto::common::FileInfoResponse;
use crate::domain::entities::candidates::CandidateProfile;
use crate::utils::bson_utils::to_rfc3339;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 150, message = "Le titre est trop long"))]
    pub titre: Option<String>,

    pub competences: Option<Vec<String>>,

    #[validate(range(min = 0, max = 60, message = "L'expérience doit être comprise entre 0 et 60 ans"))]
    pub experience_annees: Option<i32>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Le niveau d'étude est trop long"))]
    pub niveau_etude: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 150, message = "La localisation est trop longue"))]
    pub localisation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub titre: Option<String>,
    pub competences: Vec<String>,
    pub experience_annees: Option<i32>,
    pub niveau_etude: Option<String>,
    pub localisation: Option<String>,
    pub cv: Option<FileInfoResponse>,
    pub updated_at: String,
}

impl From<CandidateProfile> for ProfileResponse {
    fn from(profile: CandidateProfile) -> Self {
        Self {
            user_id: profile.user_id.to_hex(),
            titre: profile.titre,
            competences: profile.competences,
            experience_annees: profile.experience_annees,
            niveau_etude: profile.niveau_etude,
            localisation: profile.localisation,
            cv: profile.cv.as_ref().map(FileInfoResponse::from),
            updated_at: to_rfc3339(&profile.updated_at),
        }
    }
}
