//! 인증 보안 관련 리포지토리
//!
//! - [`BlacklistRepository`] - 폐기된 JWT (`token_blacklist`, TTL 인덱스 + Redis 플래그)
//! - [`AuthLogRepository`] - 가입/로그인/로그아웃 감사 로그 (`auth_logs`)

pub mod blacklist_repo;
pub mod auth_log_repo;

pub use blacklist_repo::BlacklistRepository;
pub use auth_log_repo::AuthLogRepository;
