//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::AppError;
use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser};
use crate::repositories::security::BlacklistRepository;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<UserRole>,
    pub check_revocation: bool,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role;
        let check_revocation = self.check_revocation;

        Box::pin(async move {
            let user = match authenticate_request(&req, check_revocation).await {
                Ok(Some(user)) => user,
                Ok(None) if mode == AuthMode::Optional => {
                    log::debug!("Authentification optionnelle: requête anonyme");
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
                Ok(None) => {
                    let err = AppError::AuthenticationError("En-tête Authorization manquant".to_string());
                    log::warn!("🔒 Authentification refusée sur {}: {}", req.path(), err);
                    return Ok(reject(req, err));
                }
                Err(err) => {
                    if matches!(err, AppError::AuthenticationError(_)) {
                        log::warn!("🔒 Authentification refusée sur {}: {}", req.path(), err);
                    } else {
                        log::error!("Vérification du jeton impossible sur {}: {}", req.path(), err);
                    }
                    return Ok(reject(req, err));
                }
            };

            if let Some(required) = required_role {
                if user.role != required {
                    log::warn!(
                        "⛔ Accès refusé: {} ({}) sur {}, rôle requis: {}",
                        user.email,
                        user.role.as_str(),
                        req.path(),
                        required.as_str()
                    );
                    let err = AppError::AuthorizationError(
                        "Vous n'avez pas les droits nécessaires pour cette action".to_string(),
                    );
                    return Ok(reject(req, err));
                }
            }

            log::debug!("Authentifié: {} ({})", user.email, user.role.as_str());
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 에러를 `{"error": ...}` 응답으로 바꿔 요청을 끝냅니다.
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 헤더의 Bearer 토큰을 검증하고 폐기 여부를 확인합니다.
///
/// `Authorization` 헤더가 없으면 `Ok(None)`입니다. 헤더가 있으면 모드와 관계없이 검증합니다.
async fn authenticate_request(req: &ServiceRequest, check_revocation: bool) -> Result<Option<AuthenticatedUser>, AppError> {
    let Some(auth_header) = req.headers().get("Authorization") else {
        return Ok(None);
    };
    let auth_header = auth_header
        .to_str()
        .map_err(|_| AppError::AuthenticationError("En-tête Authorization invalide".to_string()))?;

    let token_service = TokenService::instance();
    let token = token_service.extract_bearer_token(auth_header)?;
    let user = token_service.authenticate(token)?;

    if check_revocation && BlacklistRepository::instance().is_revoked(&user.token_jti).await? {
        return Err(AppError::AuthenticationError("Jeton révoqué".to_string()));
    }

    Ok(Some(user))
}
