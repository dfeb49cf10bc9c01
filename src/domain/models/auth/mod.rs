//! 요청 단위 인증 모델
//!
//! 인증 미들웨어가 JWT를 검증한 뒤 요청 extensions에 넣는 [`AuthenticatedUser`]와,
//! 라우트 스코프별 인증 모드, 감사 로그용 [`ClientInfo`]를 정의합니다.

pub mod authenticated_user;
pub mod authentication_request;
pub mod client_info;

pub use authenticated_user::*;
pub use authentication_request::*;
pub use client_info::*;
