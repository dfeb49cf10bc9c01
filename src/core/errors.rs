//! # Application Error Handling System
//!
//! 채용 플랫폼 백엔드 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하고, `?` 연산자로
//! 전파된 에러는 `actix_web::ResponseError` 구현을 통해 일관된 JSON 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필수 필드 누락, 형식 오류, 마감된 공고 |
//! | `ConflictError` | 400 Bad Request | 중복 이메일, 중복 지원 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, 만료/폐기된 토큰 |
//! | `AuthorizationError` | 403 Forbidden | 소유하지 않은 공고/면접 수정 |
//! | `NotFound` | 404 Not Found | 존재하지 않는 문서 |
//! | `DatabaseError` | 500 | MongoDB 오류 |
//! | `RedisError` | 500 | 캐시 오류 |
//! | `StorageError` | 500 | 업로드 저장소 오류 |
//! | `ExternalServiceError` | 500 | 외부 API 오류 |
//! | `InternalError` | 500 | 예상치 못한 오류 |
//!
//! 중복 리소스는 클라이언트 입력 오류로 간주하여 409가 아닌 400으로 응답합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn apply(&self, offer_id: &str, candidate_id: &str) -> Result<Application, AppError> {
//!     if self.application_repo.exists_for(offer_id, candidate_id).await? {
//!         return Err(AppError::ConflictError(
//!             "Vous avez déjà postulé à cette offre".to_string()
//!         ));
//!     }
//!     // ...
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 서비스/리포지토리 계층에서 발생하는 모든 에러를 포괄하며,
/// 핸들러에서 반환되면 자동으로 HTTP 응답으로 변환됩니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // MongoDB 에러 변환
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // 입력 검증 에러 변환
/// payload.validate()
///     .map_err(|e| AppError::ValidationError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복 리소스 (400)
    ///
    /// 이메일 중복 가입, 같은 공고에 대한 두 번째 지원 등
    /// 이미 존재하는 문서를 다시 만들려는 요청입니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 업로드 파일 저장소 에러 (500)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 외부 서비스 에러 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 종류에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::ConflictError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::StorageError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 원인을 로그로 남기고 클라이언트에는 같은 형식의 JSON을 반환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_is_bad_request() {
        let error = AppError::ConflictError("Cet email est déjà utilisé".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Offre introuvable".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Not the owner".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_server_side_errors_are_500() {
        for error in [
            AppError::DatabaseError("down".to_string()),
            AppError::RedisError("down".to_string()),
            AppError::StorageError("disk full".to_string()),
            AppError::ExternalServiceError("azure".to_string()),
            AppError::InternalError("boom".to_string()),
        ] {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
