//! # 사용자 계정 서비스
//!
//! 로그인한 사용자의 내 정보 조회/수정과, 관리자용 계정 활성화 및
//! 인증 감사 로그 조회를 담당합니다.

use std::sync::Arc;
use mongodb::bson::{doc, DateTime};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::users::{AuthEventResponse, AuthLogQuery, UpdateMeRequest, UserResponse},
    domain::models::auth::AuthenticatedUser,
    repositories::security::AuthLogRepository,
    repositories::users::UserRepository,
    utils::bson_utils::parse_object_id,
    utils::string_utils::{normalize_email, validate_required_string},
};

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    auth_log_repo: Arc<AuthLogRepository>,
}

impl UserService {
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<UserResponse, AppError> {
        let user_id = user.object_id()?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))
    }

    /// 이름/전화번호 부분 수정. 빈 요청은 400입니다.
    pub async fn update_me(&self, user: &AuthenticatedUser, request: UpdateMeRequest) -> Result<UserResponse, AppError> {
        if request.is_empty() {
            return Err(AppError::ValidationError("Aucun champ à modifier".to_string()));
        }

        let mut update_doc = doc! { "updated_at": DateTime::now() };
        if let Some(nom) = request.nom {
            update_doc.insert("nom", validate_required_string(&nom, "nom")?);
        }
        if let Some(prenom) = request.prenom {
            update_doc.insert("prenom", validate_required_string(&prenom, "prenom")?);
        }
        if let Some(telephone) = request.telephone {
            update_doc.insert("telephone", telephone.trim());
        }

        self.user_repo
            .update(&user.object_id()?, update_doc)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))
    }

    /// 관리자: 계정 활성화/비활성화
    ///
    /// 비활성 계정은 로그인과 토큰 갱신이 거부됩니다. 자기 계정은 비활성화할 수 없습니다.
    pub async fn set_activation(&self, admin: &AuthenticatedUser, user_id: &str, is_active: bool) -> Result<UserResponse, AppError> {
        let target_id = parse_object_id(user_id, "utilisateur")?;

        if !is_active && target_id == admin.object_id()? {
            return Err(AppError::ValidationError("Vous ne pouvez pas désactiver votre propre compte".to_string()));
        }

        let updated = self.user_repo
            .update(&target_id, doc! { "is_active": is_active, "updated_at": DateTime::now() })
            .await?
            .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

        log::info!(
            "🛡️ Compte {} {} par {}",
            updated.email,
            if is_active { "activé" } else { "désactivé" },
            admin.email
        );

        Ok(UserResponse::from(updated))
    }

    /// 관리자: 최근 인증 이벤트
    pub async fn list_auth_logs(&self, query: &AuthLogQuery) -> Result<Vec<AuthEventResponse>, AppError> {
        let email = query.email.as_deref().map(normalize_email);

        let events = self.auth_log_repo
            .find_recent(email.as_deref(), query.effective_limit())
            .await?;

        Ok(events.into_iter().map(AuthEventResponse::from).collect())
    }
}
