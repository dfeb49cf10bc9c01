//! JWT 인증 미들웨어
//!
//! 라우트 스코프마다 인증 모드와 필요한 역할을 지정해 감쌉니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<UserRole>,
    /// 폐기 목록 확인 여부
    check_revocation: bool,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            check_revocation: true,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: UserRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
            check_revocation: true,
        }
    }

    /// 필수 인증 (역할 무관)
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 필수
    pub fn required_with_role(role: UserRole) -> Self {
        Self::new_with_role(AuthMode::Required, role)
    }

    /// 폐기 목록 조회 없이 서명만 확인합니다 (데이터베이스 없는 단위 테스트용).
    #[cfg(test)]
    pub(crate) fn without_revocation_check(mut self) -> Self {
        self.check_revocation = false;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role,
            check_revocation: self.check_revocation,
        }))
    }
}
