//! 면접과 면접 녹화 리포지토리

pub mod interview_repo;
pub mod recording_repo;

pub use interview_repo::InterviewRepository;
pub use recording_repo::RecordingRepository;
