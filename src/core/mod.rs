//! # Core Framework Module
//!
//! 백엔드 서비스 전체가 공유하는 핵심 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 전역 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **의존성 해결**: `Arc<T>` 필드 자동 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: `actix_web::ResponseError` 구현
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use singleton_macro::{repository, service};
//!
//! #[repository(name = "offer", collection = "offres_emploi")]
//! pub struct OfferRepository {
//!     db: Arc<Database>,
//! }
//!
//! #[service(name = "offer")]
//! pub struct OfferService {
//!     offer_repo: Arc<OfferRepository>, // 자동 주입
//! }
//!
//! let offer_service = OfferService::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
