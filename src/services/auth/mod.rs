//! 인증 및 보안 서비스 모듈
//!
//! - [`TokenService`] - HS256 JWT 발급/검증, Bearer 파싱, 토큰 해시
//! - [`AuthService`] - 가입, 로그인, 갱신, 로그아웃, 비밀번호 변경, 블랙리스트 확인
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, TokenService};
//!
//! let response = AuthService::instance().login(request, &client).await?;
//! let user = TokenService::instance().authenticate(&response.tokens.access_token)?;
//! ```

pub mod token_service;
pub mod auth_service;

pub use token_service::*;
pub use auth_service::*;
