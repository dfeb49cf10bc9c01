//! 회사 서비스

pub mod company_service;

pub use company_service::*;
