use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::files::StoredFile;

/// 면접 녹화 (Enregistrement)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub entretien_id: ObjectId,
    pub uploaded_by: ObjectId,
    pub video: StoredFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub created_at: DateTime,
}
