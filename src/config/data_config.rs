//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 캐시, 서버, CORS, 요청 제한, 업로드 저장소 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `PROFILE` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// ```rust,ignore
    /// if Environment::current().is_production() {
    ///     JwtConfig::ensure_secret_configured()?;
    /// }
    /// ```
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("PROFILE"))
            .unwrap_or_else(|_| "production".to_string());
        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위이면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트. 기본값: 8080 (`PORT`)
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소. 기본값: "0.0.0.0" (`HOST`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// actix 워커 수 (`WORKERS`). 설정되지 않으면 actix 기본값(CPU 코어 수)을 사용합니다.
    pub fn workers() -> Option<usize> {
        env::var("WORKERS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|workers| *workers > 0)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// `MONGODB_URI`. 기본값: `mongodb://localhost:27017`
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// `DATABASE_NAME`. 기본값: `recrutement`
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "recrutement".to_string())
    }
}

/// Redis 캐시 설정
///
/// Redis는 선택 사항입니다. 비활성화되었거나 기동 시 연결할 수 없으면
/// 모든 캐시 호출이 아무 일도 하지 않는 클라이언트가 등록됩니다.
pub struct CacheConfig;

impl CacheConfig {
    /// `REDIS_URL`. 기본값: `redis://127.0.0.1:6379`
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
    }

    /// `REDIS_ENABLED` (기본값 true)
    pub fn enabled() -> bool {
        env::var("REDIS_ENABLED")
            .map(|value| parse_bool(&value, true))
            .unwrap_or(true)
    }

    /// 사용자 조회 캐시 TTL (초)
    pub fn user_ttl_seconds() -> u64 {
        env::var("CACHE_USER_TTL_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(600)
    }
}

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분). 기본값: 로컬 프론트엔드 개발 서버들
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());
        parse_origins(&raw)
    }

    /// preflight 캐시 시간 (초)
    pub fn max_age() -> usize {
        env::var("CORS_MAX_AGE")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3600)
    }
}

/// IP 기반 요청 제한 설정 (actix-governor)
pub struct RateLimitConfig;

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND`. 기본값: 100
    pub fn per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|value| *value > 0)
            .unwrap_or(100)
    }

    /// `RATE_LIMIT_BURST_SIZE`. 기본값: 200
    pub fn burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|value| *value > 0)
            .unwrap_or(200)
    }
}

/// 업로드 파일 저장소 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// 로컬 디렉터리 (기본값 `Uploads/`)
    Local,
    /// Azure Blob Storage 컨테이너 (SAS 토큰)
    Azure,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "azure" | "azure_blob" | "blob" => StorageBackend::Azure,
            _ => StorageBackend::Local,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Local => "local",
            StorageBackend::Azure => "azure",
        }
    }
}

/// 업로드(CV, 면접 녹화) 설정
pub struct UploadConfig;

impl UploadConfig {
    /// `STORAGE_BACKEND` (`local` | `azure`). 기본값: local
    pub fn backend() -> StorageBackend {
        env::var("STORAGE_BACKEND")
            .map(|value| StorageBackend::from_str(&value))
            .unwrap_or(StorageBackend::Local)
    }

    /// `UPLOAD_DIR`. 기본값: `Uploads`
    pub fn upload_dir() -> String {
        env::var("UPLOAD_DIR").unwrap_or_else(|_| "Uploads".to_string())
    }

    /// CV 최대 크기 (바이트). `MAX_CV_SIZE_MB`, 기본값 5MB
    pub fn max_cv_bytes() -> usize {
        megabytes_from_env("MAX_CV_SIZE_MB", 5)
    }

    /// 면접 녹화 영상 최대 크기 (바이트). `MAX_VIDEO_SIZE_MB`, 기본값 200MB
    pub fn max_video_bytes() -> usize {
        megabytes_from_env("MAX_VIDEO_SIZE_MB", 200)
    }

    /// `AZURE_BLOB_CONTAINER_URL` (예: `https://account.blob.core.windows.net/uploads`)
    pub fn azure_container_url() -> Option<String> {
        env::var("AZURE_BLOB_CONTAINER_URL").ok().filter(|value| !value.trim().is_empty())
    }

    /// `AZURE_BLOB_SAS_TOKEN` (앞의 `?` 유무 무관)
    pub fn azure_sas_token() -> Option<String> {
        env::var("AZURE_BLOB_SAS_TOKEN")
            .ok()
            .map(|value| value.trim().trim_start_matches('?').to_string())
            .filter(|value| !value.is_empty())
    }
}

fn megabytes_from_env(key: &str, default_mb: usize) -> usize {
    let mb = env::var(key)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|mb| *mb > 0)
        .unwrap_or(default_mb);

    megabytes_to_bytes(mb).unwrap_or_else(|| {
        log::warn!("⚠️ {}={} trop grand, valeur par défaut {} Mo utilisée", key, mb, default_mb);
        default_mb.saturating_mul(1024 * 1024)
    })
}

fn megabytes_to_bytes(mb: usize) -> Option<usize> {
    mb.checked_mul(1024 * 1024)
}

/// `"1"`, `"true"`, `"yes"`, `"on"` → true, `"0"`, `"false"`, `"no"`, `"off"` → false
pub fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// 쉼표로 구분된 origin 목록을 파싱하고 끝의 `/`를 제거합니다.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_megabytes_to_bytes() {
        assert_eq!(megabytes_to_bytes(5), Some(5 * 1024 * 1024));
        assert_eq!(megabytes_to_bytes(usize::MAX), None);
        assert_eq!(megabytes_to_bytes(usize::MAX / 1024), None);
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
        assert!(Environment::from_str("prod").is_production());
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_storage_backend_from_string() {
        assert_eq!(StorageBackend::from_str("azure"), StorageBackend::Azure);
        assert_eq!(StorageBackend::from_str(" Blob "), StorageBackend::Azure);
        assert_eq!(StorageBackend::from_str("local"), StorageBackend::Local);
        assert_eq!(StorageBackend::from_str("s3"), StorageBackend::Local);
        assert_eq!(StorageBackend::Azure.as_str(), "azure");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE", false));
        assert!(parse_bool("1", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("peut-être", true));
        assert!(!parse_bool("", false));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000/, https://recrutement.example.fr ,,"),
            vec!["http://localhost:3000".to_string(), "https://recrutement.example.fr".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_upload_limits_are_positive() {
        assert!(UploadConfig::max_cv_bytes() >= 1024 * 1024);
        assert!(UploadConfig::max_video_bytes() >= 1024 * 1024);
    }
}
