//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `exp`, `jti`, `iss`)에 역할과 토큰 용도를 더합니다.

use serde::{Deserialize, Serialize};
use crate::domain::entities::users::UserRole;

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (ObjectId hex)
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub typ: TokenType,
    /// 블랙리스트 키 (UUID v4)
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// 로그인/가입/갱신 응답에 포함되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// access 토큰 수명 (초)
    pub expires_in: i64,
}
