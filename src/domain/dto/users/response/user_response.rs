use serde::{Deserialize, Serialize};
use crate::domain::entities::security::{AuthEvent, AuthEventKind};
use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::token::TokenPair;
use crate::utils::bson_utils::{id_to_hex, to_rfc3339, to_rfc3339_opt};

/// 비밀번호 해시를 제외한 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: Option<String>,
    pub role: UserRole,
    pub entreprise_id: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: id_to_hex(&user.id),
            email: user.email,
            nom: user.nom,
            prenom: user.prenom,
            telephone: user.telephone,
            role: user.role,
            entreprise_id: user.entreprise_id.map(|id| id.to_hex()),
            is_active: user.is_active,
            last_login_at: to_rfc3339_opt(&user.last_login_at),
            created_at: to_rfc3339(&user.created_at),
            updated_at: to_rfc3339(&user.updated_at),
        }
    }
}

/// 가입/로그인/갱신 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEventResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub email: String,
    pub event: AuthEventKind,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

impl From<AuthEvent> for AuthEventResponse {
    fn from(event: AuthEvent) -> Self {
        Self {
            id: id_to_hex(&event.id),
            user_id: event.user_id.map(|id| id.to_hex()),
            email: event.email,
            event: event.event,
            ip_address: event.ip_address,
            user_agent: event.user_agent,
            created_at: to_rfc3339(&event.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_password_hash() {
        let mut user = User::new(
            "jean@example.fr".to_string(),
            "$2b$04$secret".to_string(),
            "Dupont".to_string(),
            "Jean".to_string(),
            None,
            UserRole::Candidat,
        );
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "candidat");
        assert_eq!(json["id"].as_str().unwrap().len(), 24);
    }
}
