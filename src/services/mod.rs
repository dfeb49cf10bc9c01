//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 싱글톤이 되며, 리포지토리와 업로드 저장소는
//! `Arc<T>` 필드로 `ServiceLocator`에서 주입됩니다.
//!
//! | 모듈 | 서비스 |
//! |------|--------|
//! | [`auth`] | 가입, 로그인, 토큰 발급/갱신/폐기 |
//! | [`users`] | 내 정보, 관리자 계정 관리, 인증 로그 |
//! | [`companies`] | 회사 등록/수정 |
//! | [`offers`] | 채용 공고 검색과 관리 |
//! | [`candidates`] | 지원자 프로필, 프로필 CV |
//! | [`applications`] | 지원, 철회, 지원자 관리 |
//! | [`interviews`] | 면접 일정과 녹화 |
//!
//! 문서 단위 권한 확인은 [`access`]에 모여 있습니다.
//!
//! ```rust,ignore
//! use crate::services::offers::OfferService;
//!
//! let offers = OfferService::instance().list(&query).await?;
//! ```

pub mod access;
pub mod auth;
pub mod users;
pub mod companies;
pub mod offers;
pub mod candidates;
pub mod applications;
pub mod interviews;
