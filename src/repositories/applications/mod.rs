//! 지원서 리포지토리

pub mod application_repo;

pub use application_repo::{ApplicationRepository, DUPLICATE_APPLICATION};
