//! 지원자 프로필 리포지토리

pub mod candidate_repo;

pub use candidate_repo::CandidateRepository;
