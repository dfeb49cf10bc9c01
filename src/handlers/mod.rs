//! # HTTP Request Handlers Module
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - 추출, 검증, 응답 코드       ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 규칙, 권한                   ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB 접근, Redis 캐시          ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities/DTO - 도메인 모델                       ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하고, JSON 본문은
//! `validator`로 검증한 뒤 서비스 싱글톤(`XxxService::instance()`)에 넘깁니다.
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_offer(
//!     user: AuthenticatedUser,
//!     payload: web::Json<CreateOfferRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let offer = OfferService::instance().create(&user, payload.into_inner()).await?;
//!     Ok(HttpResponse::Created().json(offer))
//! }
//! ```
//!
//! ## 모듈 구성
//! - **`auth`**: 가입, 로그인, 토큰 갱신, 로그아웃, 내 정보
//! - **`companies`**: 회사
//! - **`offers`**: 채용 공고, 지원
//! - **`candidates`**: 지원자 프로필, 내 지원서, 내 면접
//! - **`applications`**: 지원자 관리, CV 다운로드
//! - **`interviews`**: 면접 일정, 녹화
//! - **`admin`**: 인증 로그, 계정 활성화

pub mod auth;
pub mod companies;
pub mod offers;
pub mod candidates;
pub mod applications;
pub mod interviews;
pub mod admin;
