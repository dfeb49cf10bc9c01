//! 채용 공고 서비스

pub mod offer_service;

pub use offer_service::*;
