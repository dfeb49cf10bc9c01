//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 정규식 이스케이프
//! - [`multipart`] - CV/녹화 업로드 파싱과 검증
//! - [`bson_utils`] - ObjectId 파싱, 날짜 변환
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::bson_utils::parse_object_id;
//!
//! let titre = validate_required_string("  Développeur Rust  ", "titre")?;
//! let offre_id = parse_object_id(&path.into_inner(), "offre")?;
//! ```

pub mod string_utils;
pub mod multipart;
pub mod bson_utils;
pub mod display_terminal;
