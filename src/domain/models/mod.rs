//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델입니다.
//!
//! - [`auth`] - 요청에 붙는 인증 사용자, 스코프별 인증 모드
//! - [`token`] - JWT 클레임과 토큰 쌍
//!
//! ```rust,ignore
//! use crate::domain::models::auth::AuthenticatedUser;
//! use crate::domain::entities::users::UserRole;
//!
//! // 핸들러에서 역할 확인 (불일치 시 403)
//! user.require_any_role(&[UserRole::Recruteur, UserRole::Admin])?;
//! ```

pub mod auth;
pub mod token;
