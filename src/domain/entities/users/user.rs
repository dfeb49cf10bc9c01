//! User Entity Implementation
//!
//! 이메일/패스워드로 인증하는 플랫폼 계정입니다. 역할(`role`)에 따라
//! 접근 가능한 API 범위가 나뉩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 계정 역할
///
/// | 값 | 설명 |
/// |----|------|
/// | `candidat` | 공고에 지원하고 면접을 받는 사용자 |
/// | `recruteur` | 공고를 올리고 지원자를 관리하는 사용자 |
/// | `admin` | 계정 활성화, 인증 로그 조회 (자가 가입 불가) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Candidat,
    Recruteur,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Candidat => "candidat",
            UserRole::Recruteur => "recruteur",
            UserRole::Admin => "admin",
        }
    }

    /// 대소문자 무관 파싱. `candidate`/`recruiter` 영문 표기도 허용합니다.
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "candidat" | "candidate" => Some(UserRole::Candidat),
            "recruteur" | "recruiter" => Some(UserRole::Recruteur),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// 가입 API로 직접 선택할 수 있는 역할인지
    pub fn can_self_register(&self) -> bool {
        !matches!(self, UserRole::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
    pub nom: String,
    pub prenom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    pub role: UserRole,
    /// 채용 담당자가 소속된 회사
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entreprise_id: Option<ObjectId>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        nom: String,
        prenom: String,
        telephone: Option<String>,
        role: UserRole,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash,
            nom,
            prenom,
            telephone,
            role,
            entreprise_id: None,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// "Prénom Nom"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::from_str("Candidat"), Some(UserRole::Candidat));
        assert_eq!(UserRole::from_str("recruiter"), Some(UserRole::Recruteur));
        assert_eq!(UserRole::from_str("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("manager"), None);
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(UserRole::Candidat.can_self_register());
        assert!(UserRole::Recruteur.can_self_register());
        assert!(!UserRole::Admin.can_self_register());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Recruteur).unwrap(), "\"recruteur\"");
        let role: UserRole = serde_json::from_str("\"candidat\"").unwrap();
        assert_eq!(role, UserRole::Candidat);
    }

    #[test]
    fn test_new_user_is_active() {
        let user = User::new(
            "jean.dupont@example.fr".to_string(),
            "hash".to_string(),
            "Dupont".to_string(),
            "Jean".to_string(),
            None,
            UserRole::Candidat,
        );
        assert!(user.is_active);
        assert!(user.id.is_none());
        assert_eq!(user.full_name(), "Jean Dupont");
        assert!(!user.is_admin());
    }
}
