use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 블랙리스트에 오른 JWT
///
/// 토큰 원문 대신 `jti`와 SHA-256 해시만 저장합니다. `expires_at`에 TTL 인덱스가
/// 걸려 있어 토큰이 어차피 만료되는 시점 이후 MongoDB가 문서를 지웁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub jti: String,
    pub token_hash: String,
    pub user_id: ObjectId,
    /// `logout`, `password_changed`, `refresh_rotated`
    pub reason: String,
    pub expires_at: DateTime,
    pub created_at: DateTime,
}
