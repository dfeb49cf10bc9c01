//! 인증 요청관련 DTO
//!
//! 가입, 로그인, 토큰 갱신, 로그아웃, 내 정보 수정 요청을 매핑합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Adresse email invalide"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Le mot de passe doit contenir au moins 8 caractères"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire"))]
    pub nom: String,

    #[validate(length(min = 1, max = 100, message = "Le prénom est obligatoire"))]
    pub prenom: String,

    /// `candidat` | `recruteur`
    #[validate(custom(function = "validate_self_register_role"))]
    pub role: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 30, message = "Numéro de téléphone trop long"))]
    pub telephone: Option<String>,
}

fn validate_self_register_role(role: &str) -> Result<(), ValidationError> {
    match role.trim().to_lowercase().as_str() {
        "candidat" | "candidate" | "recruteur" | "recruiter" => Ok(()),
        _ => Err(ValidationError::new("invalid_role")
            .with_message("Le rôle doit être 'candidat' ou 'recruteur'".into())),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Adresse email invalide"))]
    pub email: String,

    #[validate(length(min = 1, message = "Le mot de passe est obligatoire"))]
    pub password: String,
}

/// 본문이 비어 있으면 `refresh_token` 쿠키를 사용합니다.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub refresh_token: Option<String>,
}

/// 함께 폐기할 refresh 토큰 (선택)
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Le nom est trop long"))]
    pub nom: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Le prénom est trop long"))]
    pub prenom: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 30, message = "Numéro de téléphone trop long"))]
    pub telephone: Option<String>,
}

impl UpdateMeRequest {
    pub fn is_empty(&self) -> bool {
        self.nom.is_none() && self.prenom.is_none() && self.telephone.is_none()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Le mot de passe actuel est obligatoire"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Le nouveau mot de passe doit contenir au moins 8 caractères"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(role: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            nom: "Dupont".to_string(),
            prenom: "Jean".to_string(),
            role: role.to_string(),
            telephone: None,
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register("candidat", "motdepasse1", "jean@example.fr").validate().is_ok());
        assert!(register("recruteur", "motdepasse1", "jean@example.fr").validate().is_ok());

        assert!(register("admin", "motdepasse1", "jean@example.fr").validate().is_err());
        assert!(register("candidat", "court", "jean@example.fr").validate().is_err());
        assert!(register("candidat", "motdepasse1", "pas-un-email").validate().is_err());
    }

    #[test]
    fn test_update_me_blank_fields_are_ignored() {
        let request: UpdateMeRequest = serde_json::from_str(r#"{"nom": "  ", "telephone": "0601020304"}"#).unwrap();
        assert_eq!(request.nom, None);
        assert_eq!(request.telephone, Some("0601020304".to_string()));
        assert!(!request.is_empty());

        let empty: UpdateMeRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_refresh_request_accepts_empty_body() {
        let request: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.refresh_token.is_none());
    }
}
