//! 면접 및 녹화 서비스

pub mod interview_service;

pub use interview_service::*;
