//! 사용자 계정 서비스 모듈
//!
//! 내 정보 조회/수정과 관리자 기능(계정 활성화, 인증 로그)을 제공합니다.
//! 가입/로그인 등 인증 흐름은 [`crate::services::auth::AuthService`]에 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let me = UserService::instance().me(&user).await?;
//! ```

pub mod user_service;

pub use user_service::*;
