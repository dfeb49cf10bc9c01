//! # Authentication Configuration Module
//!
//! JWT 발급/검증에 사용하는 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"   # 프로덕션 필수
//! export JWT_EXPIRATION_HOURS="24"                # access 토큰 수명
//! export JWT_REFRESH_EXPIRATION_DAYS="7"          # refresh 토큰 수명
//! export JWT_ISSUER="recrutement-backend"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let secret = JwtConfig::secret();
//! let access_ttl = JwtConfig::access_ttl_seconds();
//! ```

use std::env;
use crate::config::Environment;

const DEV_FALLBACK_SECRET: &str = "dev-only-recrutement-secret";

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명 키를 반환합니다.
    ///
    /// 설정되지 않은 경우 개발용 키로 대체하고 경고를 남깁니다.
    /// 프로덕션에서는 기동 시 [`JwtConfig::ensure_secret_configured`]가 먼저 실패합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .unwrap_or_else(|| {
                log::warn!("JWT_SECRET not set, using development secret (not secure for production!)");
                DEV_FALLBACK_SECRET.to_string()
            })
    }

    /// 프로덕션에서 `JWT_SECRET`이 없으면 에러를 반환합니다.
    pub fn ensure_secret_configured() -> Result<(), String> {
        let configured = env::var("JWT_SECRET")
            .map(|secret| !secret.trim().is_empty())
            .unwrap_or(false);
        Self::check_secret(&Environment::current(), configured)
    }

    fn check_secret(environment: &Environment, configured: bool) -> Result<(), String> {
        if environment.is_production() && !configured {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        Ok(())
    }

    /// access 토큰 수명 (시간). 기본값: 24
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(24)
    }

    /// refresh 토큰 수명 (일). 기본값: 7
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|days: &i64| *days > 0)
            .unwrap_or(7)
    }

    pub fn access_ttl_seconds() -> i64 {
        Self::expiration_hours() * 3600
    }

    pub fn refresh_ttl_seconds() -> i64 {
        Self::refresh_expiration_days() * 24 * 3600
    }

    /// `iss` 클레임. 기본값: `recrutement-backend`
    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| "recrutement-backend".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_is_fatal_only_in_production() {
        assert!(JwtConfig::check_secret(&Environment::Production, false).is_err());
        assert!(JwtConfig::check_secret(&Environment::Production, true).is_ok());
        assert!(JwtConfig::check_secret(&Environment::Development, false).is_ok());
        assert!(JwtConfig::check_secret(&Environment::Test, false).is_ok());
    }

    #[test]
    fn test_ttl_defaults() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::access_ttl_seconds(), 24 * 3600);
        }
        if env::var("JWT_REFRESH_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::refresh_ttl_seconds(), 7 * 24 * 3600);
        }
    }

    #[test]
    fn test_secret_is_never_empty() {
        assert!(!JwtConfig::secret().is_empty());
    }
}
