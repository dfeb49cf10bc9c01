//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <jwt>` 추출 및 서명/만료/타입 검증
//! - 폐기 목록(`token_blacklist`) 확인
//! - 스코프별 역할 확인 (불일치 시 403)
//! - 선택적 인증 스코프: 헤더가 없으면 익명, 헤더가 있으면 필수 인증과 같은 검증
//! - 검증된 사용자를 request extension에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::domain::entities::users::UserRole;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/api/recruteur")
//!     .wrap(AuthMiddleware::required_with_role(UserRole::Recruteur))
//!     .service(list_my_offers);
//!
//! web::scope("/api/offres-emploi")
//!     .wrap(AuthMiddleware::optional())
//!     .service(list_offers);
//!
//! web::scope("/api/entretiens")
//!     .wrap(AuthMiddleware::required())
//!     .service(get_interview);
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
