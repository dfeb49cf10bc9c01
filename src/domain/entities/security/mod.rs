//! 인증 관련 영속 엔티티
//!
//! - [`AuthEvent`]: 가입/로그인/로그아웃 감사 로그 (`auth_logs`)
//! - [`RevokedToken`]: 로그아웃 등으로 폐기된 JWT (`token_blacklist`)

pub mod auth_event;
pub mod revoked_token;

pub use auth_event::*;
pub use revoked_token::*;
