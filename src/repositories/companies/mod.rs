//! 회사 리포지토리

pub mod company_repo;

pub use company_repo::CompanyRepository;
