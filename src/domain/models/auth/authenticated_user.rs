//! 인증된 사용자 정보
//!
//! 핸들러는 인자로 `AuthenticatedUser`를 받기만 하면 됩니다.
//! 미들웨어가 넣어 둔 값이 없으면 401이 반환됩니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let profile = AuthService::instance().me(&user).await?;
//!     Ok(HttpResponse::Ok().json(profile))
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::domain::entities::users::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ID (ObjectId hex)
    pub user_id: String,

    pub email: String,

    pub role: UserRole,

    /// 요청에 사용된 access 토큰의 `jti`
    pub token_jti: String,

    /// 요청에 사용된 access 토큰의 만료 시각 (Unix 초)
    pub token_expires_at: i64,

    /// 요청에 사용된 access 토큰의 SHA-256 hex
    pub token_hash: String,
}

impl AuthenticatedUser {
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| AppError::AuthenticationError("Identifiant utilisateur invalide dans le jeton".to_string()))
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    /// 공개 스코프 안의 보호된 엔드포인트에서 역할을 확인합니다 (불일치 시 403).
    pub fn require_any_role(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(
                "Vous n'avez pas les droits nécessaires pour cette action".to_string(),
            ))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentification requise".to_string()
            ).into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            email: "claire.martin@example.fr".to_string(),
            role,
            token_jti: "jti".to_string(),
            token_expires_at: 0,
            token_hash: "hash".to_string(),
        }
    }

    #[test]
    fn test_roles() {
        let recruteur = user(UserRole::Recruteur);
        assert!(recruteur.has_role(UserRole::Recruteur));
        assert!(recruteur.has_any_role(&[UserRole::Admin, UserRole::Recruteur]));
        assert!(!recruteur.has_any_role(&[UserRole::Candidat]));
        assert!(!recruteur.is_admin());
        assert!(user(UserRole::Admin).is_admin());
    }

    #[test]
    fn test_require_any_role() {
        assert!(user(UserRole::Recruteur).require_any_role(&[UserRole::Recruteur]).is_ok());
        assert!(matches!(
            user(UserRole::Candidat).require_any_role(&[UserRole::Recruteur, UserRole::Admin]),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_object_id() {
        let mut authenticated = user(UserRole::Candidat);
        assert!(authenticated.object_id().is_ok());

        authenticated.user_id = "garbage".to_string();
        assert!(matches!(authenticated.object_id(), Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_extractor_without_middleware_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;
        let err = result.unwrap_err();
        assert_eq!(err.error_response().status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
