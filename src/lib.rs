//! 채용 플랫폼 백엔드
//!
//! 채용 공고 게시, CV 업로드를 포함한 지원, 지원자 프로필, 면접 일정과
//! 녹화 업로드를 제공하는 REST API입니다. 싱글톤 매크로 기반 의존성 주입을 사용합니다.
//!
//! # Features
//!
//! - **인증**: 가입/로그인, HS256 access/refresh 토큰, 폐기 목록
//! - **채용 공고**: 검색과 페이지네이션, 작성자 권한
//! - **지원**: multipart CV 업로드 또는 프로필 CV 재사용, 중복 지원 차단
//! - **면접**: 일정, 취소, 녹화 업로드
//! - **MongoDB**: 영구 저장, **Redis**: 선택적 캐시
//! - **업로드 저장소**: 로컬 디렉터리 또는 Azure Blob
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 스코프별 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 추출, 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 규칙, 권한
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────┐
//! │  Repositories   │     │ UploadStore  │
//! └─────────────────┘     └──────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐     ┌──────────────┐
//! │ MongoDB + Redis │     │ disk / Azure │
//! └─────────────────┘     └──────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use recrutement_backend::services::offers::OfferService;
//!
//! let page = OfferService::instance().list(&query).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod storage;
pub mod routes;
pub mod handlers;
pub mod middlewares;
