//! 지원서 서비스

pub mod application_service;

pub use application_service::*;
