//! 지원자 프로필 서비스

pub mod candidate_service;

pub use candidate_service::*;
