//! # Domain Layer Module
//!
//! 채용 플랫폼의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서와 대응하는 영속 엔티티와 상태 값
//! ├── dto       - API 요청/응답 구조체 (validator 검증 포함)
//! └── models    - 요청 단위 인증 정보, JWT 클레임
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis / 업로드 저장소
//! ```
//!
//! ## 용어
//!
//! | 도메인 용어 | 타입 | 설명 |
//! |-------------|------|------|
//! | Offre | [`entities::JobOffer`] | 채용 공고 |
//! | Candidature | [`entities::Application`] | 공고에 대한 지원서 |
//! | Entretien | [`entities::Interview`] | 면접 일정과 녹화 |
//! | Blacklist | [`entities::RevokedToken`] | 폐기된 JWT |
//!
//! ## 사용 흐름
//!
//! ```rust,ignore
//! // 1. 요청 DTO 검증
//! payload.validate()?;
//!
//! // 2. 서비스에서 엔티티 생성/수정
//! let offer = OfferService::instance().create(&user, payload.into_inner()).await?;
//!
//! // 3. 응답 DTO로 변환
//! Ok(HttpResponse::Created().json(OfferResponse::from(offer)))
//! ```

pub mod entities;
pub mod dto;
pub mod models;
